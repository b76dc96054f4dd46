//! Parsing facade over the factory.

use tracing::debug;

use crate::components::Components;
use crate::factory::MuidFactory;
use crate::format;
use crate::strategy::Strategy;

/// Routes parsing to the right generator. Malformed input yields `None`.
#[derive(Debug, Clone, Copy)]
pub struct MuidParser<'a> {
    factory: &'a MuidFactory,
}

impl<'a> MuidParser<'a> {
    pub(crate) fn new(factory: &'a MuidFactory) -> Self {
        Self { factory }
    }

    /// Parses one identifier, detecting the strategy when `None`.
    pub fn parse(&self, muid: &str, strategy: Option<Strategy>) -> Option<Components> {
        if !format::has_valid_format(muid) {
            return None;
        }
        let (prefix, body) = format::split(muid)?;

        if !self.factory.prefix_policy().is_valid(prefix) {
            return None;
        }

        let strategy = strategy.unwrap_or_else(|| {
            let detected = self.detect_strategy(body);
            debug!(muid, %detected, "detected strategy");
            detected
        });

        self.factory.generator(strategy).parse(muid)
    }

    /// Prefix of a well-formed identifier, without decoding the body.
    pub fn extract_prefix<'m>(&self, muid: &'m str) -> Option<&'m str> {
        format::has_valid_format(muid)
            .then(|| format::split(muid).map(|(prefix, _)| prefix))
            .flatten()
    }

    /// Body of a well-formed identifier, without decoding it.
    pub fn extract_body<'m>(&self, muid: &'m str) -> Option<&'m str> {
        format::has_valid_format(muid)
            .then(|| format::split(muid).map(|(_, body)| body))
            .flatten()
    }

    /// Parses each identifier, preserving input order.
    pub fn parse_many<'m, I>(&self, muids: I, strategy: Option<Strategy>) -> Vec<(&'m str, Option<Components>)>
    where
        I: IntoIterator<Item = &'m str>,
    {
        muids
            .into_iter()
            .map(|muid| (muid, self.parse(muid, strategy)))
            .collect()
    }

    /// Guesses the producing strategy from a body.
    pub fn detect_strategy(&self, body: &str) -> Strategy {
        Strategy::detect(body)
    }
}

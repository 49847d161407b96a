//! Built-in effects and the registry the binary builds its sub-commands from.

/// Characters travel outward from the center.
pub mod expand;
/// Characters fall from the top row.
pub mod rain;

use crate::engine::effect::Effect;
use crate::foundation::error::{TermfxError, TermfxResult};

/// Configuration of one effect: parsable from sub-command arguments or a JSON object.
pub trait EffectConfig:
    clap::Args + serde::de::DeserializeOwned + serde::Serialize + Default + 'static
{
    /// Sub-command and registry name.
    const NAME: &'static str;
    /// One-line description for `--help` and `--list`.
    const ABOUT: &'static str;

    /// Reject values the engine cannot run with.
    fn validate(&self) -> TermfxResult<()>;

    /// Build the runnable effect from validated options.
    fn into_effect(self) -> TermfxResult<Box<dyn Effect>>;
}

/// Registry record: the effect name, its option schema, and factories.
#[derive(Clone, Copy)]
pub struct EffectEntry {
    /// Registry name.
    pub name: &'static str,
    /// One-line description.
    pub about: &'static str,
    /// Sub-command carrying the effect's options.
    pub command: fn() -> clap::Command,
    /// Parse sub-command matches into an effect.
    pub from_matches: fn(&clap::ArgMatches) -> TermfxResult<Box<dyn Effect>>,
    /// Build an effect from a JSON options object.
    pub from_json: fn(serde_json::Value) -> TermfxResult<Box<dyn Effect>>,
    /// Resolved default options as JSON.
    pub defaults: fn() -> TermfxResult<serde_json::Value>,
}

impl std::fmt::Debug for EffectEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectEntry")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

fn command<C: EffectConfig>() -> clap::Command {
    C::augment_args(clap::Command::new(C::NAME).about(C::ABOUT))
}

fn from_matches<C: EffectConfig>(matches: &clap::ArgMatches) -> TermfxResult<Box<dyn Effect>> {
    let cfg = C::from_arg_matches(matches)
        .map_err(|e| TermfxError::config(format!("{}: {e}", C::NAME)))?;
    cfg.validate()?;
    cfg.into_effect()
}

fn from_json<C: EffectConfig>(options: serde_json::Value) -> TermfxResult<Box<dyn Effect>> {
    let cfg: C = serde_json::from_value(options)
        .map_err(|e| TermfxError::config(format!("{} options: {e}", C::NAME)))?;
    cfg.validate()?;
    cfg.into_effect()
}

fn defaults<C: EffectConfig>() -> TermfxResult<serde_json::Value> {
    serde_json::to_value(C::default()).map_err(|e| TermfxError::config(e.to_string()))
}

fn entry<C: EffectConfig>() -> EffectEntry {
    EffectEntry {
        name: C::NAME,
        about: C::ABOUT,
        command: command::<C>,
        from_matches: from_matches::<C>,
        from_json: from_json::<C>,
        defaults: defaults::<C>,
    }
}

/// Built-in effects in presentation order.
pub fn registry() -> Vec<EffectEntry> {
    vec![entry::<rain::RainConfig>(), entry::<expand::ExpandConfig>()]
}

/// Look up a registry entry by name.
pub fn find(name: &str) -> Option<EffectEntry> {
    registry().into_iter().find(|e| e.name == name)
}

/// A JSON run file: `{"effect": "rain", "options": {...}}`.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EffectFile {
    /// Registry name of the effect.
    pub effect: String,
    /// Effect options; missing fields take their defaults.
    #[serde(default = "empty_object")]
    pub options: serde_json::Value,
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl EffectFile {
    /// Resolve the named effect and build it from `options`.
    pub fn into_effect(self) -> TermfxResult<Box<dyn Effect>> {
        let entry = find(&self.effect)
            .ok_or_else(|| TermfxError::config(format!("unknown effect \"{}\"", self.effect)))?;
        (entry.from_json)(self.options)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/registry.rs"]
mod tests;

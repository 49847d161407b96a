use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::animation::ease::Ease;
use crate::animation::events::{Action, Event};
use crate::color::color::Color;
use crate::color::gradient::Gradient;
use crate::config::{FloatRange, MAX_GRADIENT_STEPS, Symbol, require_count, require_non_empty};
use crate::effects::EffectConfig;
use crate::engine::canvas::Canvas;
use crate::engine::effect::Effect;
use crate::foundation::core::Coord;
use crate::foundation::error::{TermfxError, TermfxResult};

const FADE_STEPS: usize = 7;
const FADE_FRAME_TICKS: u32 = 5;

fn colors(hex: &[&str]) -> Vec<Color> {
    hex.iter().filter_map(|h| h.parse().ok()).collect()
}

/// Options for the rain effect.
#[derive(clap::Args, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RainConfig {
    /// Rain drop colors, chosen at random per character (xterm 0-255 or RRGGBB).
    #[arg(long, num_args = 1.., default_values_t = RainConfig::default().rain_colors)]
    pub rain_colors: Vec<Color>,

    /// Color the characters settle on when no gradient is given.
    #[arg(long, default_value_t = RainConfig::default().final_color)]
    pub final_color: Color,

    /// Falling speed range in cells per tick, e.g. 0.1-0.2.
    #[arg(long, default_value_t = RainConfig::default().movement_speed)]
    pub movement_speed: FloatRange,

    /// Rain drop symbols, chosen at random per character.
    #[arg(long, num_args = 1.., default_values_t = RainConfig::default().rain_symbols)]
    pub rain_symbols: Vec<Symbol>,

    /// Final gradient stops, applied from bottom to top. One color means a flat final color.
    #[arg(long, num_args = 1.., default_values_t = RainConfig::default().final_gradient_stops)]
    pub final_gradient_stops: Vec<Color>,

    /// Colors per final gradient segment.
    #[arg(
        long,
        default_value_t = 12,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_GRADIENT_STEPS))
    )]
    pub final_gradient_steps: u32,

    /// Easing applied to the fall.
    #[arg(long, default_value_t = Ease::InQuart)]
    pub easing: Ease,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            rain_colors: colors(&[
                "00315C", "004C8F", "0075DB", "3F91D9", "78B9F2", "9AC8F5", "B8D8F8", "E3EFFC",
            ]),
            final_color: Color::rgb(255, 255, 255),
            movement_speed: FloatRange { lo: 0.1, hi: 0.2 },
            rain_symbols: ["o", ".", ",", "*", "|"]
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect(),
            final_gradient_stops: colors(&["8A008A", "00D1FF", "FFFFFF"]),
            final_gradient_steps: 12,
            easing: Ease::InQuart,
        }
    }
}

impl EffectConfig for RainConfig {
    const NAME: &'static str = "rain";
    const ABOUT: &'static str = "Rain characters from the top of the output area.";

    fn validate(&self) -> TermfxResult<()> {
        require_non_empty("--rain-colors", &self.rain_colors)?;
        require_non_empty("--rain-symbols", &self.rain_symbols)?;
        require_count(
            "--final-gradient-steps",
            self.final_gradient_steps,
            MAX_GRADIENT_STEPS,
        )?;
        FloatRange::new(self.movement_speed.lo, self.movement_speed.hi)?;
        Ok(())
    }

    fn into_effect(self) -> TermfxResult<Box<dyn Effect>> {
        Ok(Box::new(Rain { cfg: self }))
    }
}

/// Characters fall from the top row to their input position one row group at a time, bottom
/// row first, then fade from their drop color into the final gradient.
pub struct Rain {
    cfg: RainConfig,
}

impl Rain {
    fn final_gradient(&self) -> TermfxResult<Gradient> {
        if self.cfg.final_gradient_stops.is_empty() {
            Gradient::new(&[self.cfg.final_color], 1)
        } else {
            Gradient::new(
                &self.cfg.final_gradient_stops,
                self.cfg.final_gradient_steps as usize,
            )
        }
    }
}

impl Effect for Rain {
    fn name(&self) -> &'static str {
        RainConfig::NAME
    }

    fn prepare(&mut self, canvas: &mut Canvas, rng: &mut StdRng) -> TermfxResult<()> {
        let top = canvas.output_area().top;
        let final_gradient = self.final_gradient()?;

        for c in canvas.characters_mut() {
            let target = c.input_coord();
            let final_color =
                final_gradient.color_at_fraction(f64::from(target.row) / f64::from(top.max(1)));
            c.final_color = Some(final_color);

            let drop_color = *self
                .cfg
                .rain_colors
                .choose(rng)
                .ok_or_else(|| TermfxError::config("--rain-colors must not be empty"))?;
            let drop_symbol = self
                .cfg
                .rain_symbols
                .choose(rng)
                .ok_or_else(|| TermfxError::config("--rain-symbols must not be empty"))?;

            let rain = c.animation.new_scene(false);
            rain.add_frame(drop_symbol.as_str(), 1, Some(drop_color))?;
            let rain = rain.id();

            let fade_gradient = Gradient::new(&[drop_color, final_color], FADE_STEPS)?;
            let input_symbol = c.input_symbol().to_owned();
            let fade = c.animation.new_scene(false);
            fade.apply_gradient_to_symbol(&fade_gradient, &input_symbol, FADE_FRAME_TICKS)?;
            let fade = fade.id();

            c.activate_scene(rain)?;
            c.motion.set_coordinate(Coord::new(top, target.column));
            let speed = rng.gen_range(self.cfg.movement_speed.lo..=self.cfg.movement_speed.hi);
            let fall = c.motion.new_path(speed, self.cfg.easing)?;
            fall.new_waypoint(target);
            let fall = fall.id();

            c.register_event(Event::PathComplete(fall), Action::ActivateScene(fade));
            c.activate_path(fall)?;
        }
        Ok(())
    }

    fn batch_size(&mut self, _pending: usize, rng: &mut StdRng) -> usize {
        rng.gen_range(1..=3)
    }

    fn pick(&mut self, pending: usize, rng: &mut StdRng) -> usize {
        rng.gen_range(0..pending)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/rain.rs"]
mod tests;

use rand::rngs::StdRng;

use crate::animation::ease::Ease;
use crate::animation::events::{Action, Event};
use crate::color::color::Color;
use crate::color::gradient::Gradient;
use crate::config::{MAX_GRADIENT_STEPS, require_count, require_non_empty};
use crate::effects::EffectConfig;
use crate::engine::canvas::Canvas;
use crate::engine::character::EffectCharacter;
use crate::engine::effect::Effect;
use crate::foundation::error::{TermfxError, TermfxResult};

const FADE_STEPS: usize = 8;
const FADE_FRAME_TICKS: u32 = 3;

/// Options for the expand effect.
#[derive(clap::Args, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExpandConfig {
    /// Travel speed in cells per tick.
    #[arg(long, default_value_t = 0.35)]
    pub movement_speed: f64,

    /// Easing applied to the outward travel.
    #[arg(long, default_value_t = Ease::InOutQuart)]
    pub expand_easing: Ease,

    /// Final gradient stops, applied from left to right.
    #[arg(long, num_args = 1.., default_values_t = ExpandConfig::default().final_gradient_stops)]
    pub final_gradient_stops: Vec<Color>,

    /// Colors per final gradient segment.
    #[arg(
        long,
        default_value_t = 12,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_GRADIENT_STEPS))
    )]
    pub final_gradient_steps: u32,
}

impl Default for ExpandConfig {
    fn default() -> Self {
        Self {
            movement_speed: 0.35,
            expand_easing: Ease::InOutQuart,
            final_gradient_stops: vec![
                Color::rgb(0x8a, 0x00, 0x8a),
                Color::rgb(0x00, 0xd1, 0xff),
                Color::rgb(0xff, 0xff, 0xff),
            ],
            final_gradient_steps: 12,
        }
    }
}

impl EffectConfig for ExpandConfig {
    const NAME: &'static str = "expand";
    const ABOUT: &'static str = "Characters expand outward from the center of the output area.";

    fn validate(&self) -> TermfxResult<()> {
        require_non_empty("--final-gradient-stops", &self.final_gradient_stops)?;
        require_count(
            "--final-gradient-steps",
            self.final_gradient_steps,
            MAX_GRADIENT_STEPS,
        )?;
        if !(self.movement_speed.is_finite() && self.movement_speed > 0.0) {
            return Err(TermfxError::config("--movement-speed must be > 0"));
        }
        Ok(())
    }

    fn into_effect(self) -> TermfxResult<Box<dyn Effect>> {
        Ok(Box::new(Expand { cfg: self }))
    }
}

/// Every character leaves the center at once, then fades into its column's gradient color.
pub struct Expand {
    cfg: ExpandConfig,
}

impl Effect for Expand {
    fn name(&self) -> &'static str {
        ExpandConfig::NAME
    }

    fn prepare(&mut self, canvas: &mut Canvas, _rng: &mut StdRng) -> TermfxResult<()> {
        let area = canvas.output_area();
        let center = area.center();
        let gradient = Gradient::new(
            &self.cfg.final_gradient_stops,
            self.cfg.final_gradient_steps as usize,
        )?;
        let start_color = gradient.spectrum()[0];

        for c in canvas.characters_mut() {
            let target = c.input_coord();
            let final_color =
                gradient.color_at_fraction(f64::from(target.column) / f64::from(area.right.max(1)));
            c.final_color = Some(final_color);
            let symbol = c.input_symbol().to_owned();

            let travel = c.animation.new_scene(false);
            travel.add_frame(symbol.as_str(), 1, Some(start_color))?;
            let travel = travel.id();

            let fade = c.animation.new_scene(false);
            fade.apply_gradient_to_symbol(
                &Gradient::new(&[start_color, final_color], FADE_STEPS)?,
                &symbol,
                FADE_FRAME_TICKS,
            )?;
            let fade = fade.id();

            c.motion.set_coordinate(center);
            let out = c
                .motion
                .new_path(self.cfg.movement_speed, self.cfg.expand_easing)?;
            out.new_waypoint(target);
            let out = out.id();

            c.register_event(Event::PathComplete(out), Action::ActivateScene(fade));
            c.activate_scene(travel)?;
            c.activate_path(out)?;
        }
        Ok(())
    }

    fn group_key(&self, _character: &EffectCharacter) -> i64 {
        0
    }

    fn batch_size(&mut self, pending: usize, _rng: &mut StdRng) -> usize {
        pending
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/expand.rs"]
mod tests;

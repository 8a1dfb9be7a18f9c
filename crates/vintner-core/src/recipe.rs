//! Recipe derivation from raw berry mass.
//!
//! The arithmetic chain is fixed: the diluted base volume `v` is derived from
//! the mass, and each stage adds a share of `v` as sugar (`z`) and water
//! (`y`). Three steps are scheduled at day labels 1, 10 and 13.

use jiff::{SignedDuration, Timestamp};
use log::warn;

use crate::{
    error::{Result, TrackerError},
    models::{Bottle, BottleId, RecordedDate, Step, Totals, DEFAULT_NAME},
};

/// Day labels of the generated steps, ascending.
pub const STEP_DAYS: [u32; 3] = [1, 10, 13];

const TOTALS_TOLERANCE: f64 = 1e-6;

/// Every intermediate quantity of the recipe for one mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recipe {
    pub mass: f64,
    pub v: f64,
    pub z1: f64,
    pub y1: f64,
    pub a1: f64,
    pub z2: f64,
    pub y2: f64,
    pub a2: f64,
    pub z3: f64,
    pub final_volume: f64,
    pub total_sugar: f64,
    pub total_water: f64,
}

impl Recipe {
    /// Derive the recipe for `mass` kilograms.
    ///
    /// # Errors
    ///
    /// `TrackerError::InvalidMass` when the mass is not a finite positive
    /// number.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use vintner_core::recipe::Recipe;
    ///
    /// let recipe = Recipe::from_mass(6.0)?;
    /// assert!((recipe.final_volume - 25.0).abs() < 1e-9);
    /// assert!((recipe.total_sugar - 5.0).abs() < 1e-9);
    /// assert!((recipe.total_water - 10.0).abs() < 1e-9);
    /// # Ok::<(), vintner_core::TrackerError>(())
    /// ```
    pub fn from_mass(mass: f64) -> Result<Self> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(TrackerError::InvalidMass { mass });
        }

        let v = mass / 0.6;
        let z1 = v * 0.3;
        let y1 = v * 0.7;
        let a1 = v + z1 + y1;
        let z2 = v * 0.1;
        let y2 = v * 0.3;
        let a2 = a1 + z2 + y2;
        let z3 = v * 0.1;
        let final_volume = a2 + z3;

        Ok(Self {
            mass,
            v,
            z1,
            y1,
            a1,
            z2,
            y2,
            a2,
            z3,
            final_volume,
            total_sugar: z1 + z2 + z3,
            total_water: y1 + y2,
        })
    }

    pub fn totals(&self) -> Totals {
        Totals {
            final_volume: self.final_volume,
            total_sugar: self.total_sugar,
            total_water: self.total_water,
        }
    }

    /// The three scheduled steps, all pending, dated from `start`.
    pub fn steps(&self, start: Timestamp) -> Result<Vec<Step>> {
        let plan = [
            (
                STEP_DAYS[0],
                "Подготовка сусла",
                format!("Сахар: {:.2} кг, Вода: {:.2} л", self.z1, self.y1),
            ),
            (
                STEP_DAYS[1],
                "Первая добавка сахара",
                format!("Сахар: {:.2} кг, Вода: {:.2} л", self.z2, self.y2),
            ),
            (
                STEP_DAYS[2],
                "Вторая добавка сахара",
                format!("Сахар: {:.2} кг", self.z3),
            ),
        ];

        plan.into_iter()
            .map(|(day, title, ingredients)| {
                Ok(Step {
                    day,
                    date: Some(step_date(start, day)?.into()),
                    title: title.to_string(),
                    ingredients,
                    is_completed: false,
                })
            })
            .collect()
    }
}

/// `start + (day - 1)` whole 24-hour days.
pub fn step_date(start: Timestamp, day: u32) -> Result<Timestamp> {
    let offset = SignedDuration::from_hours(i64::from(day.saturating_sub(1)) * 24);
    start
        .checked_add(offset)
        .map_err(|_| TrackerError::invalid_input("startDate").with_reason("step date out of range"))
}

/// How a freshly created bottle is initialised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecipeOptions {
    /// Mark the day-1 step completed at creation, for operators who set the
    /// must up in the same sitting as they register the bottle.
    pub complete_first_step: bool,
}

/// Input for a new bottle.
#[derive(Debug, Clone)]
pub struct NewBottle {
    pub id: BottleId,
    pub name: Option<String>,
    pub mass: f64,
    pub description: Option<String>,
    pub start_date: Timestamp,
}

/// Build a complete bottle from its inputs.
///
/// # Errors
///
/// * `TrackerError::InvalidInput` - blank id
/// * `TrackerError::InvalidMass` - mass is not a positive number
pub fn build_bottle(input: NewBottle, options: &RecipeOptions) -> Result<Bottle> {
    if input.id.is_blank() {
        return Err(TrackerError::invalid_input("id").with_reason("must not be blank"));
    }

    let recipe = Recipe::from_mass(input.mass)?;
    let mut steps = recipe.steps(input.start_date)?;
    if options.complete_first_step {
        if let Some(first) = steps.first_mut() {
            first.is_completed = true;
        }
    }

    let name = input
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| DEFAULT_NAME.to_string());

    let mut bottle = Bottle {
        id: input.id,
        name,
        mass: input.mass,
        description: input.description.filter(|d| !d.trim().is_empty()),
        start_date: input.start_date.into(),
        is_archived: false,
        final_volume: 0.0,
        total_sugar: 0.0,
        total_water: 0.0,
        steps,
    };
    bottle.set_totals(recipe.totals());
    Ok(bottle)
}

/// Rebuild steps and totals after a mass or start-date edit.
///
/// Steps whose day label survives keep their completion flag, so a step
/// that was completed stays completed.
pub fn regenerate(bottle: &Bottle, mass: f64, start_date: Timestamp) -> Result<Bottle> {
    let recipe = Recipe::from_mass(mass)?;
    let mut steps = recipe.steps(start_date)?;
    for step in &mut steps {
        step.is_completed = bottle.step(step.day).is_some_and(|old| old.is_completed);
    }

    let mut updated = bottle.clone();
    updated.mass = mass;
    updated.start_date = RecordedDate::Valid(start_date);
    updated.steps = steps;
    updated.set_totals(recipe.totals());
    Ok(updated)
}

/// Recompute totals from mass, replacing whatever was stored.
///
/// Returns whether the stored totals had drifted from the recipe.
pub fn refresh_totals(bottle: &mut Bottle) -> Result<bool> {
    let expected = Recipe::from_mass(bottle.mass)?.totals();
    let stored = bottle.totals();
    let drifted = (stored.final_volume - expected.final_volume).abs() > TOTALS_TOLERANCE
        || (stored.total_sugar - expected.total_sugar).abs() > TOTALS_TOLERANCE
        || (stored.total_water - expected.total_water).abs() > TOTALS_TOLERANCE;
    if drifted {
        warn!(
            "Bottle {} had stale totals (volume {:.2}, expected {:.2}); recomputed from mass",
            bottle.id, stored.final_volume, expected.final_volume
        );
    }
    bottle.set_totals(expected);
    Ok(drifted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> Timestamp {
        "2024-05-01T12:00:00Z".parse().unwrap()
    }

    fn new_bottle(mass: f64) -> NewBottle {
        NewBottle {
            id: BottleId::new("1"),
            name: Some("Cherry".to_string()),
            mass,
            description: None,
            start_date: start(),
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_six_kilogram_chain() {
        let r = Recipe::from_mass(6.0).unwrap();
        assert!(close(r.v, 10.0));
        assert!(close(r.z1, 3.0));
        assert!(close(r.y1, 7.0));
        assert!(close(r.a1, 20.0));
        assert!(close(r.z2, 1.0));
        assert!(close(r.y2, 3.0));
        assert!(close(r.a2, 24.0));
        assert!(close(r.z3, 1.0));
        assert!(close(r.final_volume, 25.0));
        assert!(close(r.total_sugar, 5.0));
        assert!(close(r.total_water, 10.0));
    }

    #[test]
    fn test_invalid_mass_rejected() {
        for mass in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                Recipe::from_mass(mass),
                Err(TrackerError::InvalidMass { .. })
            ));
        }
    }

    #[test]
    fn test_totals_depend_only_on_mass() {
        let first = Recipe::from_mass(7.3).unwrap();
        let _ = Recipe::from_mass(1.0).unwrap();
        let again = Recipe::from_mass(7.3).unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn test_step_schedule() {
        let bottle = build_bottle(new_bottle(6.0), &RecipeOptions::default()).unwrap();
        let days: Vec<u32> = bottle.steps.iter().map(|s| s.day).collect();
        assert_eq!(days, vec![1, 10, 13]);

        let offsets: Vec<i64> = bottle
            .steps
            .iter()
            .map(|s| s.scheduled_at().unwrap().duration_since(start()).as_hours())
            .collect();
        assert_eq!(offsets, vec![0, 9 * 24, 12 * 24]);
        assert!(bottle.steps.iter().all(|s| !s.is_completed));
        assert_eq!(bottle.steps[0].ingredients, "Сахар: 3.00 кг, Вода: 7.00 л");
        assert_eq!(bottle.steps[2].ingredients, "Сахар: 1.00 кг");
        assert!(close(bottle.final_volume, 25.0));
    }

    #[test]
    fn test_first_step_policy() {
        let options = RecipeOptions {
            complete_first_step: true,
        };
        let bottle = build_bottle(new_bottle(6.0), &options).unwrap();
        assert!(bottle.steps[0].is_completed);
        assert!(!bottle.steps[1].is_completed);
    }

    #[test]
    fn test_blank_name_and_id() {
        let mut input = new_bottle(2.0);
        input.name = Some("   ".to_string());
        let bottle = build_bottle(input, &RecipeOptions::default()).unwrap();
        assert_eq!(bottle.name, "unnamed");

        let mut input = new_bottle(2.0);
        input.id = BottleId::new(" ");
        assert!(matches!(
            build_bottle(input, &RecipeOptions::default()),
            Err(TrackerError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_regenerate_keeps_completion() {
        let options = RecipeOptions {
            complete_first_step: true,
        };
        let bottle = build_bottle(new_bottle(6.0), &options).unwrap();
        let later: Timestamp = "2024-05-03T12:00:00Z".parse().unwrap();
        let updated = regenerate(&bottle, 12.0, later).unwrap();

        assert!(updated.steps[0].is_completed);
        assert!(close(updated.final_volume, 50.0));
        assert_eq!(updated.steps[0].scheduled_at(), Some(later));
        assert_eq!(updated.id, bottle.id);
        assert_eq!(updated.name, bottle.name);
    }

    #[test]
    fn test_refresh_totals_reports_drift() {
        let mut bottle = build_bottle(new_bottle(6.0), &RecipeOptions::default()).unwrap();
        assert!(!refresh_totals(&mut bottle).unwrap());

        bottle.final_volume = 99.0;
        assert!(refresh_totals(&mut bottle).unwrap());
        assert!(close(bottle.final_volume, 25.0));
    }
}

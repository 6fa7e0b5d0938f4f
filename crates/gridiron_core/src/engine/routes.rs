//! Route catalog and per-play route selection
//!
//! Each template lists the receiver's target depth for each of the 5 rounds
//! and whether that round moves laterally. A template may name a break round
//! (1-based) at which the receiver cuts.
//!
//! ## Selection
//! With 3+ eligible receivers the fastest runs a deep route, the next fastest
//! a medium route and the slowest a short route (ties keep input order). The
//! rest draw any template of the zone; on late downs they prefer templates
//! that reach the line to gain. A zone with no template of the wanted depth
//! class falls back to the nearest shallower class, then deeper.

use crate::error::{EngineError, Result};
use crate::models::{FieldPosition, Player, Skill};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const ROUTE_ROUNDS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    pub target_depth: f32,
    #[serde(default)]
    pub crossing: bool,
}

const fn step(target_depth: f32, crossing: bool) -> RouteStep {
    RouteStep { target_depth, crossing }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteTemplate {
    pub name: String,
    pub steps: [RouteStep; ROUTE_ROUNDS],
    /// 1-based round of the cut
    #[serde(default)]
    pub break_round: Option<u8>,
}

impl RouteTemplate {
    fn new(name: &str, steps: [RouteStep; ROUTE_ROUNDS], break_round: Option<u8>) -> Self {
        Self { name: name.to_string(), steps, break_round }
    }

    /// Step for a 1-based round. Rounds past the template hold the last step.
    pub fn step(&self, round: u8) -> RouteStep {
        let idx = (round.max(1) as usize - 1).min(ROUTE_ROUNDS - 1);
        self.steps[idx]
    }

    pub fn max_depth(&self) -> f32 {
        self.steps.iter().map(|s| s.target_depth).fold(f32::MIN, f32::max)
    }

    pub fn depth_class(&self) -> DepthClass {
        DepthClass::for_depth(self.max_depth())
    }

    pub fn is_break(&self, round: u8) -> bool {
        self.break_round == Some(round)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthClass {
    /// max depth < 6
    Short,
    /// 6..=15
    Medium,
    /// > 15
    Deep,
}

impl DepthClass {
    pub fn for_depth(depth: f32) -> Self {
        if depth < 6.0 {
            DepthClass::Short
        } else if depth <= 15.0 {
            DepthClass::Medium
        } else {
            DepthClass::Deep
        }
    }

    /// Search order when the zone lacks this class.
    fn fallback_order(self) -> [DepthClass; 3] {
        match self {
            DepthClass::Deep => [DepthClass::Deep, DepthClass::Medium, DepthClass::Short],
            DepthClass::Medium => [DepthClass::Medium, DepthClass::Short, DepthClass::Deep],
            DepthClass::Short => [DepthClass::Short, DepthClass::Medium, DepthClass::Deep],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldZone {
    Goalline,
    Redzone,
    Standard,
}

impl FieldZone {
    pub fn classify(yards_from_goal: i32) -> Self {
        if yards_from_goal <= 8 {
            FieldZone::Goalline
        } else if yards_from_goal <= 20 {
            FieldZone::Redzone
        } else {
            FieldZone::Standard
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteCatalog {
    pub goalline: Vec<RouteTemplate>,
    pub redzone: Vec<RouteTemplate>,
    pub standard: Vec<RouteTemplate>,
}

impl Default for RouteCatalog {
    fn default() -> Self {
        const F: bool = false;
        const T: bool = true;
        let flat = RouteTemplate::new(
            "flat",
            [step(1.0, F), step(2.0, T), step(3.0, T), step(3.0, F), step(4.0, F)],
            Some(2),
        );
        let drag = RouteTemplate::new(
            "drag",
            [step(1.0, F), step(2.0, T), step(3.0, T), step(4.0, T), step(5.0, T)],
            None,
        );

        Self {
            goalline: vec![
                flat.clone(),
                drag.clone(),
                RouteTemplate::new(
                    "quick_slant",
                    [step(2.0, F), step(3.0, T), step(4.0, T), step(5.0, T), step(5.0, T)],
                    Some(2),
                ),
                RouteTemplate::new(
                    "quick_out",
                    [step(2.0, F), step(4.0, F), step(6.0, T), step(6.0, T), step(6.0, F)],
                    Some(3),
                ),
                RouteTemplate::new(
                    "fade",
                    [step(2.0, F), step(4.0, F), step(6.0, F), step(7.0, F), step(8.0, F)],
                    None,
                ),
            ],
            redzone: vec![
                flat.clone(),
                drag.clone(),
                RouteTemplate::new(
                    "slant",
                    [step(2.0, F), step(4.0, T), step(6.0, T), step(7.0, T), step(8.0, T)],
                    Some(2),
                ),
                RouteTemplate::new(
                    "curl",
                    [step(3.0, F), step(6.0, F), step(9.0, F), step(9.0, F), step(9.0, F)],
                    Some(3),
                ),
                RouteTemplate::new(
                    "dig",
                    [step(4.0, F), step(8.0, F), step(11.0, T), step(12.0, T), step(12.0, T)],
                    Some(3),
                ),
                RouteTemplate::new(
                    "corner_fade",
                    [step(4.0, F), step(8.0, F), step(12.0, T), step(16.0, T), step(18.0, F)],
                    Some(3),
                ),
                RouteTemplate::new(
                    "seam",
                    [step(5.0, F), step(10.0, F), step(15.0, F), step(17.0, F), step(19.0, F)],
                    None,
                ),
            ],
            standard: vec![
                flat,
                drag,
                RouteTemplate::new(
                    "slant",
                    [step(2.0, F), step(4.0, T), step(6.0, T), step(7.0, T), step(8.0, T)],
                    Some(2),
                ),
                RouteTemplate::new(
                    "curl",
                    [step(4.0, F), step(8.0, F), step(12.0, F), step(11.0, F), step(11.0, F)],
                    Some(3),
                ),
                RouteTemplate::new(
                    "out",
                    [step(4.0, F), step(8.0, F), step(10.0, T), step(10.0, T), step(10.0, T)],
                    Some(3),
                ),
                RouteTemplate::new(
                    "dig",
                    [step(5.0, F), step(10.0, F), step(13.0, T), step(14.0, T), step(15.0, T)],
                    Some(3),
                ),
                RouteTemplate::new(
                    "post",
                    [step(5.0, F), step(10.0, F), step(15.0, T), step(20.0, F), step(25.0, F)],
                    Some(3),
                ),
                RouteTemplate::new(
                    "corner",
                    [step(5.0, F), step(10.0, F), step(14.0, T), step(18.0, T), step(22.0, F)],
                    Some(3),
                ),
                RouteTemplate::new(
                    "go",
                    [step(6.0, F), step(12.0, F), step(18.0, F), step(24.0, F), step(30.0, F)],
                    None,
                ),
            ],
        }
    }
}

impl RouteCatalog {
    pub fn zone(&self, zone: FieldZone) -> &[RouteTemplate] {
        match zone {
            FieldZone::Goalline => &self.goalline,
            FieldZone::Redzone => &self.redzone,
            FieldZone::Standard => &self.standard,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for zone in [FieldZone::Goalline, FieldZone::Redzone, FieldZone::Standard] {
            let templates = self.zone(zone);
            if templates.is_empty() {
                return Err(EngineError::InvalidConfig(format!("route zone {zone:?} is empty")));
            }
            for template in templates {
                if let Some(round) = template.break_round {
                    if round == 0 || round as usize > ROUTE_ROUNDS {
                        return Err(EngineError::InvalidConfig(format!(
                            "route '{}' break round {round} outside 1..={ROUTE_ROUNDS}",
                            template.name
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Assign one route per receiver, in receiver order.
pub fn select_routes<'a, R: Rng + ?Sized>(
    receivers: &[Player],
    field: &FieldPosition,
    catalog: &'a RouteCatalog,
    rng: &mut R,
) -> Result<Vec<&'a RouteTemplate>> {
    let zone = FieldZone::classify(field.yards_from_goal);
    let templates = catalog.zone(zone);
    if templates.is_empty() {
        return Err(EngineError::InvalidConfig(format!("route zone {zone:?} is empty")));
    }

    let required = required_classes(receivers);
    let late_down = field.down >= 3;

    let routes = required
        .into_iter()
        .map(|class| match class {
            Some(class) => pick_class(templates, class, rng),
            None if late_down => pick_reaching(templates, field.yards_to_go as f32, rng),
            None => &templates[rng.gen_range(0..templates.len())],
        })
        .collect();

    log::trace!("routes selected for {} receivers in {:?}", receivers.len(), zone);
    Ok(routes)
}

/// Depth class each receiver must run, `None` for free choice.
fn required_classes(receivers: &[Player]) -> Vec<Option<DepthClass>> {
    let n = receivers.len();
    let mut required = vec![None; n];
    if n < 3 {
        return required;
    }

    // Stable sort keeps input order among equal speeds.
    let mut by_speed: Vec<usize> = (0..n).collect();
    by_speed.sort_by(|&a, &b| {
        let sa = receivers[a].attributes.value(Skill::Speed);
        let sb = receivers[b].attributes.value(Skill::Speed);
        sb.total_cmp(&sa)
    });

    required[by_speed[0]] = Some(DepthClass::Deep);
    required[by_speed[1]] = Some(DepthClass::Medium);
    required[by_speed[n - 1]] = Some(DepthClass::Short);
    required
}

fn pick_class<'a, R: Rng + ?Sized>(
    templates: &'a [RouteTemplate],
    class: DepthClass,
    rng: &mut R,
) -> &'a RouteTemplate {
    for candidate_class in class.fallback_order() {
        let candidates: Vec<&RouteTemplate> =
            templates.iter().filter(|t| t.depth_class() == candidate_class).collect();
        if !candidates.is_empty() {
            return candidates[rng.gen_range(0..candidates.len())];
        }
    }
    &templates[rng.gen_range(0..templates.len())]
}

fn pick_reaching<'a, R: Rng + ?Sized>(
    templates: &'a [RouteTemplate],
    yards_to_go: f32,
    rng: &mut R,
) -> &'a RouteTemplate {
    let reaching: Vec<&RouteTemplate> =
        templates.iter().filter(|t| t.max_depth() >= yards_to_go).collect();
    if reaching.is_empty() {
        &templates[rng.gen_range(0..templates.len())]
    } else {
        reaching[rng.gen_range(0..reaching.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttributeSet, Position};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn receiver(id: u32, speed: f32) -> Player {
        Player::new(id, format!("WR{id}"), Position::WR, AttributeSet::uniform(65.0).with(Skill::Speed, speed))
    }

    #[test]
    fn test_zone_classification() {
        assert_eq!(FieldZone::classify(8), FieldZone::Goalline);
        assert_eq!(FieldZone::classify(9), FieldZone::Redzone);
        assert_eq!(FieldZone::classify(20), FieldZone::Redzone);
        assert_eq!(FieldZone::classify(21), FieldZone::Standard);
    }

    #[test]
    fn test_default_catalog_is_valid() {
        let catalog = RouteCatalog::default();
        assert!(catalog.validate().is_ok());
        assert!(catalog.standard.iter().any(|t| t.depth_class() == DepthClass::Deep));
        assert!(catalog.goalline.iter().all(|t| t.depth_class() != DepthClass::Deep));
    }

    #[test]
    fn test_step_rounds_are_one_based() {
        let catalog = RouteCatalog::default();
        let go = catalog.standard.iter().find(|t| t.name == "go").unwrap();
        assert_eq!(go.step(1).target_depth, 6.0);
        assert_eq!(go.step(5).target_depth, 30.0);
        assert_eq!(go.step(6).target_depth, 30.0);
    }

    #[test]
    fn test_three_receivers_get_short_medium_deep() {
        let catalog = RouteCatalog::default();
        let receivers = vec![receiver(1, 70.0), receiver(2, 92.0), receiver(3, 80.0)];
        let field = FieldPosition::first_and_ten(60);

        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let routes = select_routes(&receivers, &field, &catalog, &mut rng).unwrap();
            assert_eq!(routes[1].depth_class(), DepthClass::Deep, "fastest runs deep");
            assert_eq!(routes[2].depth_class(), DepthClass::Medium);
            assert_eq!(routes[0].depth_class(), DepthClass::Short, "slowest runs short");
        }
    }

    #[test]
    fn test_goalline_deep_falls_back_to_medium() {
        let catalog = RouteCatalog::default();
        let receivers = vec![receiver(1, 90.0), receiver(2, 80.0), receiver(3, 70.0)];
        let field = FieldPosition::new(5, 5, 1);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let routes = select_routes(&receivers, &field, &catalog, &mut rng).unwrap();
        assert_eq!(routes[0].depth_class(), DepthClass::Medium);
        assert_eq!(routes[2].depth_class(), DepthClass::Short);
    }

    #[test]
    fn test_equal_speed_keeps_input_order() {
        let receivers = vec![receiver(1, 80.0), receiver(2, 80.0), receiver(3, 80.0)];
        let classes = required_classes(&receivers);
        assert_eq!(
            classes,
            vec![Some(DepthClass::Deep), Some(DepthClass::Medium), Some(DepthClass::Short)]
        );
    }

    #[test]
    fn test_selection_is_deterministic_for_seed() {
        let catalog = RouteCatalog::default();
        let receivers: Vec<Player> = (1..=5).map(|i| receiver(i, 60.0 + i as f32 * 5.0)).collect();
        let field = FieldPosition::new(45, 8, 3);
        let names = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            select_routes(&receivers, &field, &catalog, &mut rng)
                .unwrap()
                .iter()
                .map(|t| t.name.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(names(11), names(11));
    }

    #[test]
    fn test_empty_zone_is_config_error() {
        let mut catalog = RouteCatalog::default();
        catalog.redzone.clear();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let field = FieldPosition::first_and_ten(15);
        let result = select_routes(&[receiver(1, 80.0)], &field, &catalog, &mut rng);
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }
}

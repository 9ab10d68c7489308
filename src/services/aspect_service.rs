//! Aspect detection between body pairs

use crate::models::{AspectDefinition, AspectMatch, CelestialBody};
use crate::utils::circular_diff;

/// Classify the angular relationship of every unordered body pair
///
/// For each pair the circular difference (in `[0, 180]`) is tested against
/// every definition; the pair qualifies for a definition when the error
/// `|diff - angle|` is within its orb. Among qualifying definitions the one
/// with minimum error wins, not the first in table order; on an exact error
/// tie the earlier definition in the table wins. Pairs with no qualifying
/// definition are omitted.
pub fn detect_aspects(
    bodies: &[CelestialBody],
    definitions: &[AspectDefinition],
) -> Vec<AspectMatch> {
    let mut matches = Vec::new();

    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            let diff = circular_diff(bodies[i].longitude, bodies[j].longitude);

            let mut best: Option<(&AspectDefinition, f64)> = None;
            for definition in definitions {
                let error = (diff - definition.angle).abs();
                if error <= definition.orb {
                    // Strict < keeps the earlier definition on exact ties
                    let improves = match best {
                        Some((_, best_error)) => error < best_error,
                        None => true,
                    };
                    if improves {
                        best = Some((definition, error));
                    }
                }
            }

            if let Some((definition, error)) = best {
                matches.push(AspectMatch {
                    body_a: bodies[i].name.clone(),
                    body_b: bodies[j].name.clone(),
                    actual_diff: diff,
                    aspect_angle: definition.angle,
                    aspect_name: definition.name.clone(),
                    color: definition.color,
                    error,
                });
            }
        }
    }

    matches
}

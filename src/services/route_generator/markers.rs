use super::geometry::{cumulative_distances, interpolate};
use crate::models::{Coordinates, Marker, MarkerRole, RouteShape};

/// Spread `count` progress markers along `coords` at equal path-distance intervals.
///
/// Marker 1 sits on the first coordinate and marker `count` on the last; the
/// rest are interpolated inside the segment that brackets their target distance.
/// Paths with fewer than two points get no markers.
pub fn place_markers(coords: &[Coordinates], shape: RouteShape, count: usize) -> Vec<Marker> {
    if coords.len() < 2 || count == 0 {
        return Vec::new();
    }

    let dists = cumulative_distances(coords);
    let total = dists[dists.len() - 1];
    let last = coords[coords.len() - 1];

    (1..=count)
        .map(|index| {
            let target = if index == 1 {
                0.0
            } else if index == count {
                total
            } else {
                total * (index - 1) as f64 / (count - 1) as f64
            };

            let position = position_at(coords, &dists, target).unwrap_or(last);

            Marker {
                position,
                index,
                role: role_for(shape, index, count),
                distance_from_start_km: target,
            }
        })
        .collect()
}

/// Point at cumulative distance `target`, `None` if no segment brackets it
fn position_at(coords: &[Coordinates], dists: &[f64], target: f64) -> Option<Coordinates> {
    dists
        .windows(2)
        .position(|w| w[0] <= target && target <= w[1])
        .map(|j| {
            let segment_length = dists[j + 1] - dists[j];
            if segment_length == 0.0 {
                coords[j]
            } else {
                let ratio = (target - dists[j]) / segment_length;
                interpolate(&coords[j], &coords[j + 1], ratio)
            }
        })
}

fn role_for(shape: RouteShape, index: usize, count: usize) -> MarkerRole {
    if index == 1 {
        return MarkerRole::Start;
    }
    if index == count {
        return MarkerRole::Finish;
    }

    match shape {
        RouteShape::OutAndBack => {
            // With an odd count the middle marker lands on the half-way distance
            if count % 2 == 1 && index == count / 2 + 1 {
                MarkerRole::Turnaround
            } else if index <= count / 2 {
                MarkerRole::TurnaroundSideA
            } else {
                MarkerRole::TurnaroundSideB
            }
        }
        RouteShape::Circular | RouteShape::PointToPoint => MarkerRole::Regular,
    }
}

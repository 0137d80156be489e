use crate::chart::assembler::place_in_houses;
use crate::chart::{build_angles, Annotation, Chart, ChartAssembler, ChartKind, ChartMetadata, ChartSettings};
use crate::derived::DerivedPoints;
use crate::error::{ChartError, ChartResult};
use crate::houses::HouseCusps;
use crate::math::shortest_arc_midpoint;
use crate::predictive::settings_like;

/// Midpoint composite of two charts.
///
/// Points present in both charts are midpointed on the shorter arc; the
/// Ascendant and Midheaven likewise, with Descendant and IC derived from them.
/// Cusps are the pairwise cusp midpoints when those still form twelve ordered
/// houses, otherwise the chart has no houses and says so in an annotation.
pub fn composite_chart(assembler: &ChartAssembler, a: &Chart, b: &Chart) -> ChartResult<Chart> {
    let mut points = Vec::new();
    for pa in a.points() {
        let Some(pb) = b.point(pa.body) else {
            continue;
        };
        let mut point = pa.relocated(
            shortest_arc_midpoint(pa.longitude, pb.longitude),
            0.5 * (pa.speed_longitude + pb.speed_longitude),
        );
        point.latitude = 0.5 * (pa.latitude + pb.latitude);
        point.distance_au = 0.5 * (pa.distance_au + pb.distance_au);
        points.push(point);
    }

    let (Some(asc_a), Some(asc_b), Some(mc_a), Some(mc_b)) = (a.ascendant(), b.ascendant(), a.midheaven(), b.midheaven())
    else {
        return Err(ChartError::MalformedInput("composite needs both charts' angles".to_string()));
    };
    let angles = build_angles(shortest_arc_midpoint(asc_a, asc_b), shortest_arc_midpoint(mc_a, mc_b), None, None);

    let mut annotations = Vec::new();
    let cusps = match (a.cusps(), b.cusps()) {
        (Some(ca), Some(cb)) => {
            let mut raw = [0.0; 12];
            for (i, cusp) in raw.iter_mut().enumerate() {
                *cusp = shortest_arc_midpoint(ca.as_array()[i], cb.as_array()[i]);
            }
            match HouseCusps::new(raw) {
                Ok(cusps) => Some(cusps),
                Err(e) => {
                    log::warn!("composite cusps omitted: {}", e);
                    annotations.push(Annotation::from_error("cusps", &e));
                    None
                }
            }
        }
        _ => None,
    };
    if let Some(cusps) = &cusps {
        place_in_houses(&mut points, cusps, &mut annotations);
    }

    let meta_a = a.metadata();
    let aspect_angles = meta_a.aspect_angles.clone().filter(|_| meta_a.aspect_angles == b.metadata().aspect_angles);
    let settings = ChartSettings { aspect_angles: aspect_angles.clone(), ..settings_like(a) };
    let aspects = assembler.aspects_for(&points, &angles, &settings);
    let metadata = ChartMetadata {
        house_system: meta_a.house_system.filter(|s| Some(*s) == b.metadata().house_system),
        zodiac: meta_a.zodiac,
        aspect_angles,
        annotations,
        ..ChartMetadata::new(ChartKind::Composite)
    };
    Ok(Chart::from_parts(metadata, points, angles, cusps, aspects, DerivedPoints::default()))
}

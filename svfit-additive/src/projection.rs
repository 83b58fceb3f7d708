use std::collections::BTreeSet;

use svfit_core::models::{Located, coordinates};

use crate::event::Event;
use crate::route::{Route, Segment};

/// Position of a feature boundary on a route: the segment index and its event.
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy, PartialOrd, Ord)]
pub struct Location {
    pub segment_idx: usize,
    pub event: Event,
}

impl Location {
    pub fn of(segment_idx: usize, event: Event) -> Location {
        Location { segment_idx, event }
    }
}

///
/// A feature mapped onto a route.
///
/// `start` and `end` are the segments holding the first and the last base of the
/// feature, in the order of the derivative molecule. `spanned` holds every segment the
/// feature overlaps, and always contains `start` and `end`.
///
#[derive(Debug, Clone)]
pub struct Projection<'a, T> {
    source: &'a T,
    route: &'a Route,
    start: Location,
    end: Location,
    spanned: BTreeSet<Location>,
}

impl<'a, T: Located> Projection<'a, T> {
    ///
    /// Project `feature` onto `route`.
    ///
    /// Returns `None` when the feature is on a contig the route does not visit or does
    /// not overlap the reference window of its contig. A boundary lying past an outer end
    /// of the route resolves to the outermost segment of that arm, which covers untouched
    /// reference. A feature crossing the junction of a breakend route is truncated there;
    /// its missing boundary resolves to the breakend segment.
    ///
    pub fn project(route: &'a Route, feature: &'a T) -> Option<Projection<'a, T>> {
        let location = feature.location();
        let (arm, window) = route
            .references()
            .iter()
            .enumerate()
            .find(|(_, w)| w.same_contig(location))?;

        let on_arm = location.with_strand(window.strand);
        let (start, end) = (on_arm.start, on_arm.end);
        if start >= window.end || end <= window.start {
            return None;
        }
        let junction = route
            .breakend_index()
            .map(|b| Location::of(b, Event::Breakend));
        let segments = route.arm(arm);
        let outer = |idx: usize| Location::of(idx, route.segments()[idx].event);

        // overhangs resolve to the junction on its side, to the outermost segment otherwise
        let mut start_location = None;
        let mut end_location = None;
        let mut spanned = BTreeSet::new();
        if start < window.start {
            start_location = match (arm, junction) {
                (1, Some(j)) => Some(j),
                _ => Some(outer(segments.clone().next()?)),
            };
        }
        if end > window.end {
            end_location = match (arm, junction) {
                (0, Some(j)) => Some(j),
                _ => Some(outer(segments.clone().next_back()?)),
            };
        }

        for idx in segments {
            let segment = &route.segments()[idx];
            for (s, e) in segment.extents_on(&window.contig, window.strand) {
                let here = Location::of(idx, segment.event);
                if start_location.is_none() && s < e && s <= start && start < e {
                    start_location = Some(here);
                }
                if end_location.is_none() && s < e && s < end && end <= e {
                    end_location = Some(here);
                }
                if coordinates::overlap(s, e, start, end) {
                    spanned.insert(here);
                }
            }
        }

        let (start_location, end_location) = (start_location?, end_location?);
        spanned.insert(start_location);
        spanned.insert(end_location);

        Some(Projection {
            source: feature,
            route,
            start: start_location,
            end: end_location,
            spanned,
        })
    }
}

impl<'a, T> Projection<'a, T> {
    pub fn source(&self) -> &'a T {
        self.source
    }

    pub fn route(&self) -> &'a Route {
        self.route
    }

    pub fn start_location(&self) -> Location {
        self.start
    }

    pub fn end_location(&self) -> Location {
        self.end
    }

    pub fn start_event(&self) -> Event {
        self.start.event
    }

    pub fn end_event(&self) -> Event {
        self.end.event
    }

    pub fn spanned_locations(&self) -> &BTreeSet<Location> {
        &self.spanned
    }

    pub fn spanned_events(&self) -> BTreeSet<Event> {
        self.spanned.iter().map(|l| l.event).collect()
    }

    /// Spanned segments in route order.
    pub fn spanned_segments(&self) -> Vec<&'a Segment> {
        let segments = self.route.segments();
        self.spanned
            .iter()
            .map(|l| &segments[l.segment_idx])
            .collect()
    }

    pub fn is_intra_segment(&self) -> bool {
        self.start.segment_idx == self.end.segment_idx
    }

    pub fn is_deleted(&self) -> bool {
        self.is_intra_segment()
            && self.start_event() == Event::Deletion
            && self.end_event() == Event::Deletion
    }

    /// Does a boundary of the feature fall into an event that cuts the feature apart?
    pub fn is_truncated(&self) -> bool {
        if self.is_intra_segment() {
            return self.is_deleted();
        }
        [self.start_event(), self.end_event()]
            .iter()
            .any(|e| matches!(e, Event::Deletion | Event::Inversion | Event::Breakend))
    }

    /// Spanned segments as `EVENT[idx]`, joined by commas.
    pub fn describe_spanned(&self) -> String {
        self.spanned
            .iter()
            .map(|l| format!("{}[{}]", l.event, l.segment_idx))
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::assemble;
    use svfit_core::models::{
        Breakend, BreakendPair, Contig, Enhancer, GenomicRegion, SimpleVariant, Strand, Variant,
        VariantType,
    };

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    fn chr1() -> Contig {
        Contig::new("chr1", 10_000)
    }

    fn chr2() -> Contig {
        Contig::new("chr2", 5_000)
    }

    fn enhancer(contig: Contig, strand: Strand, start: u32, end: u32) -> Enhancer {
        let location = GenomicRegion::new(contig, Strand::Positive, start, end)
            .unwrap()
            .with_strand(strand);
        Enhancer::new("E", location)
    }

    fn variant(id: &str, start: u32, end: u32, vt: VariantType) -> Variant {
        let region = GenomicRegion::new(chr1(), Strand::Positive, start, end).unwrap();
        SimpleVariant::new(id, region, vt).unwrap().into()
    }

    #[fixture]
    fn route() -> Route {
        // GAP[0] DEL[1] GAP[2] INV[3] GAP[4] over [0, 5_000)
        let variants = vec![
            variant("del", 1_000, 2_000, VariantType::Deletion),
            variant("inv", 3_000, 3_500, VariantType::Inversion),
        ];
        Route::materialize(&assemble(&variants).unwrap(), 1_500).unwrap()
    }

    #[rstest]
    fn test_feature_in_deletion_is_intra_segment(route: Route) {
        let feature = enhancer(chr1(), Strand::Positive, 1_200, 1_800);
        let projection = Projection::project(&route, &feature).unwrap();
        assert_eq!(projection.is_intra_segment(), true);
        assert_eq!(projection.is_deleted(), true);
        assert_eq!(projection.start_location(), Location::of(1, Event::Deletion));
    }

    #[rstest]
    fn test_feature_across_breakpoints(route: Route) {
        let feature = enhancer(chr1(), Strand::Positive, 1_500, 3_200);
        let projection = Projection::project(&route, &feature).unwrap();
        assert_eq!(projection.is_intra_segment(), false);
        assert_eq!(projection.start_location(), Location::of(1, Event::Deletion));
        assert_eq!(projection.end_location(), Location::of(3, Event::Inversion));
        assert_eq!(projection.describe_spanned(), "DEL[1],GAP[2],INV[3]");
        assert_eq!(projection.is_truncated(), true);
    }

    #[rstest]
    fn test_feature_on_negative_strand(route: Route) {
        // (-) [6_700, 7_500) is (+) [2_500, 3_300)
        let feature = enhancer(chr1(), Strand::Negative, 2_500, 3_300);
        let projection = Projection::project(&route, &feature).unwrap();
        assert_eq!(projection.start_location(), Location::of(2, Event::Gap));
        assert_eq!(projection.end_location(), Location::of(3, Event::Inversion));
    }

    #[rstest]
    fn test_boundaries_are_half_open(route: Route) {
        // ends exactly where the deletion starts: only the first gap
        let feature = enhancer(chr1(), Strand::Positive, 500, 1_000);
        let projection = Projection::project(&route, &feature).unwrap();
        assert_eq!(projection.is_intra_segment(), true);
        assert_eq!(projection.spanned_events(), BTreeSet::from([Event::Gap]));
    }

    #[rstest]
    fn test_feature_outside_route(route: Route) {
        let beyond = enhancer(chr1(), Strand::Positive, 5_000, 5_200);
        let elsewhere = enhancer(chr2(), Strand::Positive, 100, 200);
        assert_eq!(Projection::project(&route, &beyond).is_none(), true);
        assert_eq!(Projection::project(&route, &elsewhere).is_none(), true);
    }

    #[rstest]
    fn test_overhang_resolves_to_outer_gap(route: Route) {
        let overhanging = enhancer(chr1(), Strand::Positive, 3_200, 5_200);
        let projection = Projection::project(&route, &overhanging).unwrap();
        assert_eq!(projection.start_location(), Location::of(3, Event::Inversion));
        assert_eq!(projection.end_location(), Location::of(4, Event::Gap));
        assert_eq!(projection.describe_spanned(), "INV[3],GAP[4]");
    }

    #[rstest]
    fn test_long_feature_hit_in_the_middle() {
        // the deletion is far from both ends of the feature
        let variants = vec![variant("del", 5_000, 5_100, VariantType::Deletion)];
        let route = Route::materialize(&assemble(&variants).unwrap(), 1_000).unwrap();

        let long = enhancer(chr1(), Strand::Positive, 500, 9_500);
        let projection = Projection::project(&route, &long).unwrap();
        assert_eq!(projection.is_intra_segment(), false);
        assert_eq!(projection.start_location(), Location::of(0, Event::Gap));
        assert_eq!(projection.end_location(), Location::of(2, Event::Gap));
        assert_eq!(projection.describe_spanned(), "GAP[0],DEL[1],GAP[2]");
    }

    #[rstest]
    fn test_insertion_inside_feature_is_spanned() {
        let ins: Variant = SimpleVariant::insertion("ins", chr1(), Strand::Positive, 1_000, 9)
            .unwrap()
            .into();
        let route = Route::materialize(&assemble(&[ins]).unwrap(), 500).unwrap();

        let over = enhancer(chr1(), Strand::Positive, 900, 1_100);
        let projection = Projection::project(&route, &over).unwrap();
        assert_eq!(projection.describe_spanned(), "GAP[0],INS[1],GAP[2]");

        // an insertion right at the boundary sits outside the feature
        let next_to = enhancer(chr1(), Strand::Positive, 1_000, 1_100);
        let projection = Projection::project(&route, &next_to).unwrap();
        assert_eq!(projection.describe_spanned(), "GAP[2]");
    }

    #[rstest]
    fn test_feature_truncated_by_breakend() {
        let left = Breakend::new("l", chr1(), Strand::Positive, 5_000).unwrap();
        let right = Breakend::new("r", chr2(), Strand::Positive, 1_000).unwrap();
        let bnd: Variant = BreakendPair::new("bnd", left, right, 0).into();
        let route = Route::materialize(&assemble(&[bnd]).unwrap(), 2_000).unwrap();

        let on_left = enhancer(chr1(), Strand::Positive, 4_500, 5_500);
        let projection = Projection::project(&route, &on_left).unwrap();
        assert_eq!(projection.start_location(), Location::of(0, Event::Gap));
        assert_eq!(projection.end_location(), Location::of(1, Event::Breakend));
        assert_eq!(projection.is_truncated(), true);

        let on_right = enhancer(chr2(), Strand::Positive, 500, 1_500);
        let projection = Projection::project(&route, &on_right).unwrap();
        assert_eq!(projection.start_location(), Location::of(1, Event::Breakend));
        assert_eq!(projection.end_location(), Location::of(2, Event::Gap));

        // the part of chr1 past the junction is not on this derivative molecule
        let lost = enhancer(chr1(), Strand::Positive, 6_000, 6_500);
        assert_eq!(Projection::project(&route, &lost).is_none(), true);
    }
}

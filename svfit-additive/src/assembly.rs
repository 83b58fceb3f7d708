use svfit_core::models::{BreakendPair, SimpleVariant, Strand, Variant, coordinates};

use crate::error::{AssemblyError, AssemblyResult};

///
/// Variants laid out in the order they are met when reading the derivative molecule.
///
/// Every simple variant is strand-normalized: to the positive strand when there is no
/// breakend, or to the strand of the breakend end sharing its contig otherwise.
///
#[derive(PartialEq, Debug, Clone)]
pub enum VariantArrangement {
    Intrachromosomal {
        variants: Vec<SimpleVariant>,
    },
    Interchromosomal {
        left: Vec<SimpleVariant>,
        breakend: BreakendPair,
        right: Vec<SimpleVariant>,
    },
}

impl VariantArrangement {
    pub fn len(&self) -> usize {
        match self {
            VariantArrangement::Intrachromosomal { variants } => variants.len(),
            VariantArrangement::Interchromosomal { left, right, .. } => left.len() + right.len() + 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn breakend(&self) -> Option<&BreakendPair> {
        match self {
            VariantArrangement::Intrachromosomal { .. } => None,
            VariantArrangement::Interchromosomal { breakend, .. } => Some(breakend),
        }
    }

    /// Ids of the arranged variants, in derivative order.
    pub fn ids(&self) -> Vec<&str> {
        match self {
            VariantArrangement::Intrachromosomal { variants } => {
                variants.iter().map(|v| v.id.as_str()).collect()
            }
            VariantArrangement::Interchromosomal {
                left,
                breakend,
                right,
            } => left
                .iter()
                .map(|v| v.id.as_str())
                .chain(std::iter::once(breakend.id.as_str()))
                .chain(right.iter().map(|v| v.id.as_str()))
                .collect(),
        }
    }
}

///
/// Sort the variants and align their strands so they can be turned into a route.
///
/// At most one breakend pair is supported. Without one, all variants must sit on a single
/// contig. With one, its two ends must be on different contigs; variants on the left
/// contig must lie upstream of the left end and variants on the right contig downstream
/// of the right end. Overlapping variants are rejected.
///
pub fn assemble(variants: &[Variant]) -> AssemblyResult<VariantArrangement> {
    if variants.is_empty() {
        return Err(AssemblyError::Empty);
    }

    let mut breakends: Vec<&BreakendPair> = vec![];
    let mut simple: Vec<&SimpleVariant> = vec![];
    for variant in variants {
        match variant {
            Variant::Simple(v) => simple.push(v),
            Variant::Breakend(b) => breakends.push(b),
        }
    }

    match breakends.as_slice() {
        [] => assemble_intrachromosomal(&simple),
        [breakend] => assemble_interchromosomal(&simple, breakend),
        many => Err(AssemblyError::MultipleBreakends(many.len())),
    }
}

fn assemble_intrachromosomal(variants: &[&SimpleVariant]) -> AssemblyResult<VariantArrangement> {
    let mut contigs: Vec<&str> = variants
        .iter()
        .map(|v| v.region.contig.name.as_str())
        .collect();
    contigs.sort_unstable();
    contigs.dedup();
    if contigs.len() > 1 {
        return Err(AssemblyError::MultipleContigs(contigs.len()));
    }

    let sorted = normalize_and_sort(variants, Strand::Positive);
    check_disjoint(&sorted)?;

    Ok(VariantArrangement::Intrachromosomal { variants: sorted })
}

fn assemble_interchromosomal(
    variants: &[&SimpleVariant],
    breakend: &BreakendPair,
) -> AssemblyResult<VariantArrangement> {
    let (left, right) = (&breakend.left, &breakend.right);
    if left.contig.name == right.contig.name {
        return Err(AssemblyError::IntrachromosomalBreakend(
            Variant::from(breakend.clone()).summary(),
        ));
    }

    let mut on_left = vec![];
    let mut on_right = vec![];
    for &variant in variants {
        let contig = &variant.region.contig.name;
        if *contig == left.contig.name {
            on_left.push(variant);
        } else if *contig == right.contig.name {
            on_right.push(variant);
        } else {
            return Err(AssemblyError::UnrelatedContig {
                variant: variant.id.clone(),
                contig: contig.clone(),
            });
        }
    }

    let left_sorted = normalize_and_sort(&on_left, left.strand);
    for variant in &left_sorted {
        if variant.region.end > left.position {
            return Err(AssemblyError::NotUpstream {
                variant: Variant::from(variant.clone()).summary(),
                breakend: left.to_string(),
            });
        }
    }
    check_disjoint(&left_sorted)?;

    let right_sorted = normalize_and_sort(&on_right, right.strand);
    for variant in &right_sorted {
        if variant.region.start < right.position {
            return Err(AssemblyError::NotDownstream {
                variant: Variant::from(variant.clone()).summary(),
                breakend: right.to_string(),
            });
        }
    }
    check_disjoint(&right_sorted)?;

    Ok(VariantArrangement::Interchromosomal {
        left: left_sorted,
        breakend: breakend.clone(),
        right: right_sorted,
    })
}

/// Flip to `strand` and sort by start, then end, on that strand.
fn normalize_and_sort(variants: &[&SimpleVariant], strand: Strand) -> Vec<SimpleVariant> {
    let mut sorted: Vec<SimpleVariant> = variants.iter().map(|v| v.with_strand(strand)).collect();
    sorted.sort_by(|a, b| {
        (a.region.start, a.region.end, &a.id).cmp(&(b.region.start, b.region.end, &b.id))
    });
    sorted
}

/// Variants must be sorted. Two insertions at the same point count as overlapping.
fn check_disjoint(sorted: &[SimpleVariant]) -> AssemblyResult<()> {
    for pair in sorted.windows(2) {
        let (previous, current) = (&pair[0].region, &pair[1].region);
        let identical = previous.start == current.start && previous.end == current.end;
        if identical
            || coordinates::overlap(previous.start, previous.end, current.start, current.end)
        {
            return Err(AssemblyError::Overlapping(
                Variant::from(pair[0].clone()).summary(),
                Variant::from(pair[1].clone()).summary(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use svfit_core::models::{Breakend, Contig, GenomicRegion, VariantType};

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    fn chr1() -> Contig {
        Contig::new("chr1", 10_000)
    }

    fn chr2() -> Contig {
        Contig::new("chr2", 5_000)
    }

    fn simple(id: &str, contig: Contig, strand: Strand, start: u32, end: u32, vt: VariantType) -> Variant {
        let region = GenomicRegion::new(contig, strand, start, end).unwrap();
        SimpleVariant::new(id, region, vt).unwrap().into()
    }

    fn insertion(id: &str, contig: Contig, position: u32, length: u32) -> Variant {
        SimpleVariant::insertion(id, contig, Strand::Positive, position, length)
            .unwrap()
            .into()
    }

    #[fixture]
    fn translocation() -> Variant {
        // chr1(+) up to 5,000 joined to chr2(-) from 1,000 onwards
        let left = Breakend::new("l", chr1(), Strand::Positive, 5_000).unwrap();
        let right = Breakend::new("r", chr2(), Strand::Negative, 1_000).unwrap();
        BreakendPair::new("bnd", left, right, 0).into()
    }

    #[rstest]
    fn test_empty_fails() {
        assert_eq!(assemble(&[]), Err(AssemblyError::Empty));
    }

    #[rstest]
    fn test_sorts_and_normalizes() {
        let variants = vec![
            simple("b", chr1(), Strand::Positive, 500, 600, VariantType::Deletion),
            // [8_000, 8_100) on the negative strand is [1_900, 2_000) on the positive one
            simple("c", chr1(), Strand::Negative, 8_000, 8_100, VariantType::Inversion),
            simple("a", chr1(), Strand::Positive, 100, 200, VariantType::Duplication),
        ];
        let arrangement = assemble(&variants).unwrap();
        assert_eq!(arrangement.ids(), vec!["a", "b", "c"]);
        match arrangement {
            VariantArrangement::Intrachromosomal { variants } => {
                assert_eq!(variants.iter().all(|v| v.region.strand == Strand::Positive), true);
                assert_eq!((variants[2].region.start, variants[2].region.end), (1_900, 2_000));
            }
            _ => panic!("expected an intrachromosomal arrangement"),
        }
    }

    #[rstest]
    fn test_permutation_gives_same_arrangement() {
        let a = simple("a", chr1(), Strand::Positive, 100, 200, VariantType::Deletion);
        let b = insertion("b", chr1(), 300, 12);
        let c = simple("c", chr1(), Strand::Positive, 400, 401, VariantType::Snv);
        let forward = assemble(&[a.clone(), b.clone(), c.clone()]).unwrap();
        let backward = assemble(&[c, a, b]).unwrap();
        assert_eq!(forward, backward);
    }

    #[rstest]
    #[case(150, 250)]
    #[case(100, 200)]
    #[case(199, 300)]
    fn test_overlapping_fails(#[case] start: u32, #[case] end: u32) {
        let variants = vec![
            simple("a", chr1(), Strand::Positive, 100, 200, VariantType::Deletion),
            simple("b", chr1(), Strand::Positive, start, end, VariantType::Duplication),
        ];
        assert_eq!(
            matches!(assemble(&variants), Err(AssemblyError::Overlapping(_, _))),
            true
        );
    }

    #[rstest]
    fn test_adjacent_variants_are_fine() {
        let variants = vec![
            simple("a", chr1(), Strand::Positive, 100, 200, VariantType::Deletion),
            insertion("ins", chr1(), 200, 5),
            simple("b", chr1(), Strand::Positive, 200, 300, VariantType::Inversion),
        ];
        assert_eq!(assemble(&variants).unwrap().ids(), vec!["a", "ins", "b"]);
    }

    #[rstest]
    fn test_insertions_at_same_point_fail() {
        let variants = vec![insertion("a", chr1(), 100, 5), insertion("b", chr1(), 100, 7)];
        assert_eq!(assemble(&variants).is_err(), true);
    }

    #[rstest]
    fn test_multiple_contigs_fail() {
        let variants = vec![
            simple("a", chr1(), Strand::Positive, 100, 200, VariantType::Deletion),
            simple("b", chr2(), Strand::Positive, 100, 200, VariantType::Deletion),
        ];
        assert_eq!(assemble(&variants), Err(AssemblyError::MultipleContigs(2)));
    }

    #[rstest]
    fn test_two_breakends_fail(translocation: Variant) {
        let mut other = translocation.clone();
        if let Variant::Breakend(b) = &mut other {
            b.id = "bnd2".to_string();
        }
        assert_eq!(
            assemble(&[translocation, other]),
            Err(AssemblyError::MultipleBreakends(2))
        );
    }

    #[rstest]
    fn test_same_contig_breakend_fails() {
        let left = Breakend::new("l", chr1(), Strand::Positive, 1_000).unwrap();
        let right = Breakend::new("r", chr1(), Strand::Positive, 5_000).unwrap();
        let bnd: Variant = BreakendPair::new("bnd", left, right, 0).into();
        assert_eq!(
            matches!(
                assemble(&[bnd]),
                Err(AssemblyError::IntrachromosomalBreakend(_))
            ),
            true
        );
    }

    #[rstest]
    fn test_interchromosomal_arrangement(translocation: Variant) {
        let variants = vec![
            // right arm is read on chr2(-): [3_500, 3_600) there is [1_400, 1_500) on (+)
            simple("r1", chr2(), Strand::Positive, 1_400, 1_500, VariantType::Deletion),
            translocation,
            simple("l2", chr1(), Strand::Positive, 4_000, 4_100, VariantType::Deletion),
            simple("l1", chr1(), Strand::Positive, 1_000, 1_100, VariantType::Inversion),
            // [200, 300) on (+) is [4_700, 4_800) on chr2(-), further from the junction
            simple("r2", chr2(), Strand::Positive, 200, 300, VariantType::Duplication),
        ];
        let arrangement = assemble(&variants).unwrap();
        assert_eq!(arrangement.ids(), vec!["l1", "l2", "bnd", "r1", "r2"]);
        match arrangement {
            VariantArrangement::Interchromosomal { right, .. } => {
                assert_eq!(right[0].region.strand, Strand::Negative);
                assert_eq!((right[0].region.start, right[0].region.end), (3_500, 3_600));
            }
            _ => panic!("expected an interchromosomal arrangement"),
        }
    }

    #[rstest]
    fn test_variant_past_left_breakend_fails(translocation: Variant) {
        let variants = vec![
            translocation,
            simple("l", chr1(), Strand::Positive, 4_950, 5_050, VariantType::Deletion),
        ];
        assert_eq!(
            matches!(assemble(&variants), Err(AssemblyError::NotUpstream { .. })),
            true
        );
    }

    #[rstest]
    fn test_variant_before_right_breakend_fails(translocation: Variant) {
        // (+) [4_500, 4_600) is [400, 500) on chr2(-), before the junction at 1_000
        let variants = vec![
            translocation,
            simple("r", chr2(), Strand::Positive, 4_500, 4_600, VariantType::Deletion),
        ];
        assert_eq!(
            matches!(assemble(&variants), Err(AssemblyError::NotDownstream { .. })),
            true
        );
    }
}

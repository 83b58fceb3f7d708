use svfit_core::models::{CodingRegion, Gene, Transcript, coordinates};
use svfit_core::service::GeneDosageService;

use super::SequenceImpactCalculator;
use crate::config::ValidatedConfig;
use crate::diagnostic::{Impact, ImpactWarning, UtrEnd};
use crate::event::Event;
use crate::projection::Projection;
use crate::route::{Route, Segment};

/// An exon with intronic splice-region padding. Coordinates are on the transcript strand.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PaddedExon {
    padded_start: u32,
    start: u32,
    end: u32,
    padded_end: u32,
    n_coding: u32,
}

///
/// Pad every exon with `acceptor` bases upstream and `donor` bases downstream. The first
/// exon is not padded at its start, the last one not at its end, so a single-exon
/// transcript is not padded at all.
///
fn padded_exons(tx: &Transcript, cds: &CodingRegion, acceptor: u32, donor: u32) -> Vec<PaddedExon> {
    let last = tx.exons.len().saturating_sub(1);
    tx.exons
        .iter()
        .enumerate()
        .map(|(i, exon)| PaddedExon {
            padded_start: if i == 0 {
                exon.start
            } else {
                exon.start.saturating_sub(acceptor)
            },
            start: exon.start,
            end: exon.end,
            padded_end: if i == last {
                exon.end
            } else {
                exon.end.saturating_add(donor)
            },
            n_coding: coordinates::overlap_length(cds.start, cds.end, exon.start, exon.end),
        })
        .collect()
}

/// Minimal fitness is reached when at least half of the UTR is affected.
fn utr_fitness(segment_length: u32, utr_length: u32) -> f64 {
    let impact = 2. * segment_length as f64 / utr_length as f64;
    (1. - impact).max(0.)
}

/// Transcript and coding bounds, all on the transcript strand.
#[derive(Debug, Clone, Copy)]
struct UtrBounds {
    tx_start: u32,
    cds_start: u32,
    cds_end: u32,
    tx_end: u32,
}

impl UtrBounds {
    fn new(tx: &Transcript, cds: &CodingRegion) -> UtrBounds {
        UtrBounds {
            tx_start: tx.start(),
            cds_start: cds.start,
            cds_end: cds.end,
            tx_end: tx.end(),
        }
    }

    fn length(&self, utr: UtrEnd) -> u32 {
        match utr {
            UtrEnd::FivePrime => self.cds_start - self.tx_start,
            UtrEnd::ThreePrime => self.tx_end - self.cds_end,
        }
    }
}

/// A coding transcript prepared for scoring.
struct TranscriptLayout<'t> {
    tx: &'t Transcript,
    utr: UtrBounds,
    exons: Vec<PaddedExon>,
}

impl TranscriptLayout<'_> {
    fn zero_length_utr(&self, utr: UtrEnd) -> ImpactWarning {
        ImpactWarning::ZeroLengthUtr {
            transcript: self.tx.accession.clone(),
            utr,
        }
        .raise()
    }
}

///
/// Scores genes using exon, UTR, promoter and reading-frame heuristics.
///
/// The `gene_factor` is the phenotype relevance of the gene and is the `noImpact`
/// baseline; event fitness values from the configuration are fractions of it.
/// The worst consequence across transcripts, exons and segments wins.
///
pub struct GeneImpactCalculator<'a, D: GeneDosageService + ?Sized> {
    config: &'a ValidatedConfig,
    dosage: &'a D,
    gene_factor: f64,
}

impl<'a, D: GeneDosageService + ?Sized> GeneImpactCalculator<'a, D> {
    pub fn new(config: &'a ValidatedConfig, dosage: &'a D, gene_factor: f64) -> Self {
        GeneImpactCalculator {
            config,
            dosage,
            gene_factor,
        }
    }

    fn event_fitness(&self, event: Event) -> f64 {
        self.config.gene_event_fitness.get(event) * self.gene_factor
    }

    ///
    /// Worst fitness of a causal segment hitting the promoter of any transcript, if any.
    /// The promoter is the `promoter_length` bases upstream of the transcription start.
    ///
    fn check_promoter(&self, route: &Route, gene: &Gene) -> Option<f64> {
        let gain = self.config.promoter_fitness_gain;
        let mut score: Option<f64> = None;
        for tx in &gene.transcripts {
            let promoter_end = tx.start();
            let promoter_start = promoter_end.saturating_sub(self.config.promoter_length);
            for segment in route.segments().iter().filter(|s| s.event.is_causal()) {
                let hits = segment
                    .extents_on(&tx.location.contig, tx.strand())
                    .any(|(s, e)| coordinates::overlap(promoter_start, promoter_end, s, e));
                if hits {
                    let fitness = (self.event_fitness(segment.event) + self.gene_factor * gain)
                        .min(1.)
                        .min(self.gene_factor);
                    score = Some(score.map_or(fitness, |current| current.min(fitness)));
                }
            }
        }
        score
    }

    /// The whole gene sits in one segment; only dosage can make that matter.
    fn process_intra_segment(&self, projection: &Projection<'_, Gene>) -> Impact {
        let gene = projection.source();
        let dosage = gene
            .id
            .hgnc_id
            .as_deref()
            .map(|hgnc_id| self.dosage.gene_dosage_data(hgnc_id, &gene.location));
        let dosage = dosage.as_ref();

        match projection.start_event() {
            Event::Deletion => {
                if dosage.is_some_and(|d| d.is_haploinsufficient()) {
                    Impact::of(0.)
                } else {
                    Impact::of(self.no_impact())
                }
            }
            Event::Duplication => {
                if dosage.is_some_and(|d| d.is_triplosensitive()) {
                    Impact::of(2. * self.no_impact())
                } else {
                    Impact::of(self.no_impact())
                }
            }
            event @ (Event::Snv | Event::Insertion | Event::Breakend) => Impact {
                fitness: self.no_impact(),
                warnings: vec![
                    ImpactWarning::UnexpectedEnclosingEvent {
                        feature: gene.id.accession.clone(),
                        event,
                    }
                    .raise(),
                ],
            },
            Event::Gap | Event::Inversion => Impact::of(self.no_impact()),
        }
    }

    fn process_inter_segment(&self, projection: &Projection<'_, Gene>) -> Impact {
        let causal: Vec<&Segment> = projection
            .spanned_segments()
            .into_iter()
            .filter(|s| s.event.is_causal())
            .collect();

        projection
            .source()
            .transcripts
            .iter()
            .map(|tx| self.evaluate_transcript(&causal, tx))
            .fold(Impact::of(self.no_impact()), Impact::min)
    }

    fn evaluate_transcript(&self, segments: &[&Segment], tx: &Transcript) -> Impact {
        let mut impact = Impact::of(self.no_impact());

        // a junction inside the transcript separates its 5' and 3' parts
        for segment in segments.iter().filter(|s| s.event == Event::Breakend) {
            let cut = segment
                .extents_on(&tx.location.contig, tx.strand())
                .any(|(s, e)| coordinates::overlap(tx.start(), tx.end(), s, e));
            if cut {
                impact = impact.min(Impact::of(self.event_fitness(Event::Breakend)));
            }
        }

        let Some(cds) = tx.coding.as_ref() else {
            // non-coding transcripts are not scored any further
            return impact;
        };
        if tx.exons.is_empty() {
            return impact.min(Impact {
                fitness: self.no_impact(),
                warnings: vec![
                    ImpactWarning::TranscriptWithoutExons {
                        transcript: tx.accession.clone(),
                    }
                    .raise(),
                ],
            });
        }

        let layout = TranscriptLayout {
            tx,
            utr: UtrBounds::new(tx, cds),
            exons: padded_exons(
                tx,
                cds,
                self.config.intronic_acceptor_padding,
                self.config.intronic_donor_padding,
            ),
        };
        for segment in segments {
            let segment_impact = match segment.event {
                Event::Insertion => self.score_insertion(segment, &layout),
                _ => self.score_default(segment, &layout),
            };
            impact = impact.min(segment_impact);
        }
        impact
    }

    fn score_insertion(&self, segment: &Segment, layout: &TranscriptLayout<'_>) -> Impact {
        let (tx, utr) = (layout.tx, &layout.utr);
        let reference_length = segment.reference_length();
        if reference_length != 0 {
            return Impact {
                fitness: self.no_impact(),
                warnings: vec![
                    ImpactWarning::NonZeroLengthInsertion {
                        length: reference_length,
                    }
                    .raise(),
                ],
            };
        }
        let Some((position, _)) = segment.extents_on(&tx.location.contig, tx.strand()).next()
        else {
            return Impact::of(self.no_impact());
        };
        let inserted = segment.derivative_length;

        let mut n_coding_in_previous_exons: i64 = 0;
        for exon in &layout.exons {
            if !coordinates::contains(exon.padded_start, exon.padded_end, position, position) {
                n_coding_in_previous_exons += exon.n_coding as i64;
                continue;
            }

            let utr_end = if position <= utr.cds_start {
                Some(UtrEnd::FivePrime)
            } else if utr.cds_end < position {
                Some(UtrEnd::ThreePrime)
            } else {
                None
            };

            return match utr_end {
                Some(end) => {
                    let utr_length = utr.length(end);
                    if utr_length == 0 {
                        Impact {
                            fitness: self.no_impact(),
                            warnings: vec![layout.zero_length_utr(end)],
                        }
                    } else {
                        Impact::of(utr_fitness(inserted, utr_length) * self.no_impact())
                    }
                }
                None => {
                    let n_current = position as i64 - utr.cds_start.max(exon.start) as i64;
                    let on_codon_boundary =
                        (n_coding_in_previous_exons + n_current).rem_euclid(3) == 0;
                    let tiers = &self.config.insertion;
                    let fitness = if !on_codon_boundary {
                        tiers.frame_breaking
                    } else if inserted % 3 == 0 {
                        tiers.in_frame
                    } else {
                        tiers.frameshift_at_codon_boundary
                    };
                    Impact::of(fitness * self.no_impact())
                }
            };
        }

        // intronic, outside of the splice region padding
        Impact::of(self.no_impact())
    }

    fn score_default(&self, segment: &Segment, layout: &TranscriptLayout<'_>) -> Impact {
        let tx = layout.tx;
        let mut impact = Impact::of(self.no_impact());
        for (start, end) in segment.extents_on(&tx.location.contig, tx.strand()) {
            for exon_idx in 0..layout.exons.len() {
                let exon_impact = self.evaluate_exon(start, end, segment.event, exon_idx, layout);
                impact = impact.min(exon_impact);
            }
        }
        impact
    }

    /// Impact of `event` over `[start, end)` on the exon at `exon_idx`.
    fn evaluate_exon(
        &self,
        start: u32,
        end: u32,
        event: Event,
        exon_idx: usize,
        layout: &TranscriptLayout<'_>,
    ) -> Impact {
        let (exon, utr) = (&layout.exons[exon_idx], &layout.utr);
        if !coordinates::overlap(start, end, exon.padded_start, exon.padded_end) {
            return Impact::of(self.no_impact());
        }

        // transcription start site disruption is always causal
        if exon_idx == 0 && start <= exon.start && exon.start < end {
            return Impact::of(self.event_fitness(event));
        }

        if coordinates::overlap(start, end, utr.cds_start, utr.cds_end) {
            return Impact::of(self.event_fitness(event));
        }

        let utr_end = if end <= utr.cds_start {
            UtrEnd::FivePrime
        } else if utr.cds_end <= start {
            UtrEnd::ThreePrime
        } else {
            return Impact {
                fitness: self.no_impact(),
                warnings: vec![
                    ImpactWarning::UtrClassificationFailed {
                        transcript: layout.tx.accession.clone(),
                        start,
                        end,
                    }
                    .raise(),
                ],
            };
        };

        let utr_length = utr.length(utr_end);
        if utr_length == 0 {
            return Impact {
                fitness: self.no_impact(),
                warnings: vec![layout.zero_length_utr(utr_end)],
            };
        }
        Impact::of(utr_fitness(end - start, utr_length) * self.no_impact())
    }
}

impl<D: GeneDosageService + ?Sized> SequenceImpactCalculator<Gene> for GeneImpactCalculator<'_, D> {
    fn project_impact(&self, projection: &Projection<'_, Gene>) -> Impact {
        let promoter = self.check_promoter(projection.route(), projection.source());

        let gene_impact = if projection.is_intra_segment() {
            self.process_intra_segment(projection)
        } else {
            self.process_inter_segment(projection)
        };

        match promoter {
            Some(fitness) => gene_impact.min(Impact::of(fitness)),
            None => gene_impact,
        }
    }

    fn no_impact(&self) -> f64 {
        self.gene_factor
    }
}

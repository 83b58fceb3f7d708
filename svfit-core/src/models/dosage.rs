///
/// Kind of dosage sensitivity asserted for a gene or a region.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DosageSensitivity {
    None,
    Haploinsufficiency,
    Triplosensitivity,
}

/// ClinGen-style evidence level, ordered from weakest to strongest.
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DosageEvidence {
    NoEvidence,
    Little,
    Some,
    Sufficient,
}

#[derive(Eq, PartialEq, Hash, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dosage {
    pub id: String,
    pub sensitivity: DosageSensitivity,
    pub evidence: DosageEvidence,
}

impl Dosage {
    pub fn new(id: &str, sensitivity: DosageSensitivity, evidence: DosageEvidence) -> Dosage {
        Dosage {
            id: id.to_string(),
            sensitivity,
            evidence,
        }
    }

    fn asserts(&self, sensitivity: DosageSensitivity) -> bool {
        self.sensitivity == sensitivity && self.evidence >= DosageEvidence::Some
    }
}

/// All dosage assertions known for one gene.
#[derive(Eq, PartialEq, Hash, Debug, Clone, Default)]
pub struct GeneDosageData {
    pub dosages: Vec<Dosage>,
}

impl GeneDosageData {
    pub fn new(dosages: Vec<Dosage>) -> GeneDosageData {
        GeneDosageData { dosages }
    }

    pub fn is_empty(&self) -> bool {
        self.dosages.is_empty()
    }

    pub fn is_haploinsufficient(&self) -> bool {
        self.dosages
            .iter()
            .any(|d| d.asserts(DosageSensitivity::Haploinsufficiency))
    }

    pub fn is_triplosensitive(&self) -> bool {
        self.dosages
            .iter()
            .any(|d| d.asserts(DosageSensitivity::Triplosensitivity))
    }
}

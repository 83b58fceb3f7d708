use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeatureStoreError {
    #[error("Feature {feature} is located on contig {contig} that is not part of the store")]
    UnknownContig { feature: String, contig: String },

    #[error("Contig {contig} is declared with {declared} bp but feature {feature} assumes {found} bp")]
    ContigLengthMismatch {
        feature: String,
        contig: String,
        declared: u32,
        found: u32,
    },

    #[error("Contig {0} is declared more than once")]
    DuplicateContig(String),
}

pub type FeatureStoreResult<T> = std::result::Result<T, FeatureStoreError>;

//! Name-composition engine for namechoose.
//!
//! Loads the per-nationality rules and tables into an immutable registry,
//! composes names slot by slot with a seeded random source, and streams
//! batches of generated names to plain, CSV or JSON writers.

pub mod assets;
pub mod composer;
pub mod engine;
pub mod errors;
pub mod model;
pub mod output;
pub mod registry;

pub use assets::{DataLoader, LoadedNationality, default_data_root};
pub use composer::compose;
pub use engine::{GeneratedNames, GenerationEngine, seeded_rng};
pub use errors::OutputError;
pub use model::GenerateOptions;
pub use output::{NameWriter, OutputFormat, WriterOptions};
pub use registry::{NationalityDescriptor, NationalityRegistry};

use clap::ValueEnum;
use ecm_version_engine::version as engine_version;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[value(rename_all = "lowercase")]
pub enum BumpKind {
    /// Breaking changes
    Major,
    /// New features (backward compatible)
    Minor,
    /// Bug fixes (backward compatible)
    Patch,
}

/// How `--show` prints the current versions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

// From trait implementations for CLI -> Engine enum conversion

macro_rules! map_enum {
    ($from:ty, $to:ty, $($variant:ident),+ $(,)?) => {
        impl From<$from> for $to {
            fn from(f: $from) -> Self {
                match f {
                    $( <$from>::$variant => <$to>::$variant, )+
                }
            }
        }
    };
}

map_enum!(BumpKind, engine_version::BumpKind, Major, Minor, Patch);

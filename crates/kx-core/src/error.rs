use std::path::PathBuf;

/// Alias for `Result<T, KxError>`.
pub type KxResult<T> = Result<T, KxError>;

/// Errors raised while discovering or resolving project models.
#[derive(Debug, thiserror::Error)]
pub enum KxError {
    /// An assembly unit folder lacks its self-named model file.
    #[error("assembly unit model file not found: {}", expected.display())]
    MissingAssemblyModelFile {
        /// The assembly unit folder.
        folder: PathBuf,
        /// The model file that was expected inside it.
        expected: PathBuf,
    },

    /// The project's Models folder does not exist.
    #[error("models folder not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// An identifier could not be turned into a model path.
    #[error("invalid identifier \"{identifier}\": {reason}")]
    InvalidIdentifier {
        /// The rejected identifier text.
        identifier: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A file or folder name contains the reserved identifier separator.
    #[error("name \"{name}\" contains the reserved identifier separator '{separator}'")]
    ReservedSeparator {
        /// The offending name.
        name: String,
        /// The configured identifier separator.
        separator: char,
    },

    /// Two sibling models resolve to the same identifier, e.g. a part
    /// `Arm.m3d` next to an assembly folder `Arm/`.
    #[error("identifier \"{id}\" is shared by {} and {}", first.display(), second.display())]
    DuplicateIdentifier {
        /// The contested identifier.
        id: String,
        /// The model found first.
        first: PathBuf,
        /// The model that collided with it.
        second: PathBuf,
    },

    /// A model path does not lie strictly below the Models folder.
    #[error("path is outside the models folder: {}", .0.display())]
    OutsideModelsRoot(PathBuf),

    /// Assembly nesting went deeper than the configured limit.
    #[error("assembly nesting deeper than {limit} levels at {}", folder.display())]
    DepthLimitExceeded {
        /// The folder at which the limit was hit.
        folder: PathBuf,
        /// The configured maximum depth.
        limit: usize,
    },

    /// A folder resolves to one of its own ancestors (symlink loop).
    #[error("symlink cycle detected at {}", .0.display())]
    SymlinkCycle(PathBuf),

    /// A glob mask failed to compile.
    #[error("invalid mask \"{mask}\": {source}")]
    InvalidMask {
        /// The mask as given.
        mask: String,
        /// The underlying pattern error.
        source: glob::PatternError,
    },

    /// The project configuration file could not be used.
    #[error("configuration error: {0}")]
    Config(String),

    /// A filesystem operation failed.
    #[error("cannot access {}: {source}", path.display())]
    Io {
        /// The path being accessed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

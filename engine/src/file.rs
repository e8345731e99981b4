use std::path::Path;

/// Types read whole from a file on disk.
pub trait Load: Sized {
    type Error;

    fn load<P: AsRef<Path>>(filepath: P) -> Result<Self, Self::Error>;
}

/// Types written whole to a file on disk.
pub trait Save {
    type Error;

    fn save<P: AsRef<Path>>(&self, filepath: P) -> Result<(), Self::Error>;
}

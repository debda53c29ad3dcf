//! Landscape abstractions consumed by the flooding engine.
//!
//! A landscape knows how to enumerate the neighbours of a configuration and
//! how to pack a configuration into a canonical, comparable key. The engine
//! never interprets configurations itself.

use crate::error::LandscapeError;

/// Canonical packed form of a configuration.
///
/// Keys compare and hash by their bytes, so two configurations are the same
/// structure exactly when their packed keys are equal.
///
/// # Examples
/// ```
/// use barriers_core::StructureKey;
///
/// let key = StructureKey::from("((..))");
/// assert_eq!(key.as_bytes(), b"((..))");
/// assert_eq!(key.len(), 6);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StructureKey(Box<[u8]>);

impl StructureKey {
    /// Wraps already packed bytes.
    #[must_use]
    pub fn new(bytes: impl Into<Box<[u8]>>) -> Self {
        Self(bytes.into())
    }

    /// Returns the packed bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the packed length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the key holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for StructureKey {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().into())
    }
}

/// Discrete energy landscape: a neighbour relation plus canonical packing.
///
/// Implementations are selected once at setup; the engine calls them once per
/// record and never re-dispatches on configuration strings.
///
/// # Examples
/// ```
/// use barriers_core::{Landscape, LandscapeError};
///
/// struct Bits;
///
/// impl Landscape for Bits {
///     fn name(&self) -> &str { "bits" }
///     fn neighbors(&self, configuration: &str) -> Result<Vec<String>, LandscapeError> {
///         Ok((0..configuration.len())
///             .map(|flip| {
///                 configuration
///                     .chars()
///                     .enumerate()
///                     .map(|(i, c)| match (i == flip, c) {
///                         (true, '0') => '1',
///                         (true, _) => '0',
///                         (false, c) => c,
///                     })
///                     .collect()
///             })
///             .collect())
///     }
/// }
///
/// let landscape = Bits;
/// assert_eq!(landscape.neighbors("01")?, ["11", "00"]);
/// let key = landscape.pack("01")?;
/// assert_eq!(landscape.unpack(&key)?, "01");
/// # Ok::<(), LandscapeError>(())
/// ```
pub trait Landscape {
    /// Returns a human-readable name.
    fn name(&self) -> &str;

    /// Enumerates the neighbours of `configuration` in canonical order.
    ///
    /// # Errors
    /// Returns [`LandscapeError`] when `configuration` is not a valid member of
    /// the landscape.
    fn neighbors(&self, configuration: &str) -> Result<Vec<String>, LandscapeError>;

    /// Packs `configuration` into its canonical key.
    ///
    /// The default implementation stores the configuration bytes verbatim.
    ///
    /// # Errors
    /// Returns [`LandscapeError`] when `configuration` cannot be packed.
    fn pack(&self, configuration: &str) -> Result<StructureKey, LandscapeError> {
        Ok(StructureKey::from(configuration))
    }

    /// Restores the configuration encoded by `key`.
    ///
    /// The default implementation reverses the verbatim packing of
    /// [`Landscape::pack`].
    ///
    /// # Errors
    /// Returns [`LandscapeError::InvalidKey`] when the key does not decode.
    fn unpack(&self, key: &StructureKey) -> Result<String, LandscapeError> {
        String::from_utf8(key.as_bytes().to_vec())
            .map_err(|_| LandscapeError::InvalidKey { length: key.len() })
    }

    /// Whether energies are RNA free energies in kcal/mol.
    ///
    /// Only affects how reports format energies.
    fn is_rna(&self) -> bool {
        false
    }
}

impl<L: Landscape + ?Sized> Landscape for &L {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn neighbors(&self, configuration: &str) -> Result<Vec<String>, LandscapeError> {
        (**self).neighbors(configuration)
    }

    fn pack(&self, configuration: &str) -> Result<StructureKey, LandscapeError> {
        (**self).pack(configuration)
    }

    fn unpack(&self, key: &StructureKey) -> Result<String, LandscapeError> {
        (**self).unpack(key)
    }

    fn is_rna(&self) -> bool {
        (**self).is_rna()
    }
}

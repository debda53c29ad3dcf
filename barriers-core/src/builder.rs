//! Builder utilities for configuring barrier analyses.
//!
//! Collects the run options and validates them before constructing a
//! [`Barriers`] engine.

use crate::{Result, barriers::Barriers, error::BarrierError};

/// Configures and constructs [`Barriers`] instances.
///
/// # Examples
/// ```
/// use barriers_core::BarrierBuilder;
///
/// let barriers = BarrierBuilder::new()
///     .with_minh(0.5)
///     .with_max_print(20)
///     .build()
///     .expect("configuration is valid");
/// assert_eq!(barriers.minh(), 0.5);
/// assert_eq!(barriers.max_print(), 20);
/// assert!(barriers.pool_accounting());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BarrierBuilder {
    minh: f64,
    max_print: usize,
    pool_accounting: bool,
    kt: f64,
    reference_energy: Option<f64>,
}

impl Default for BarrierBuilder {
    fn default() -> Self {
        Self {
            minh: 0.0,
            max_print: 0,
            pool_accounting: true,
            kt: 1.0,
            reference_energy: None,
        }
    }
}

impl BarrierBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use barriers_core::BarrierBuilder;
    ///
    /// let builder = BarrierBuilder::new();
    /// assert_eq!(builder.minh(), 0.0);
    /// assert_eq!(builder.max_print(), 0);
    /// assert_eq!(builder.kt(), 1.0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the significance threshold for reported barriers.
    #[must_use]
    pub fn with_minh(mut self, minh: f64) -> Self {
        self.minh = minh;
        self
    }

    /// Returns the configured significance threshold.
    #[must_use]
    pub fn minh(&self) -> f64 {
        self.minh
    }

    /// Limits the number of significant basins; `0` means unlimited.
    ///
    /// Flooding stops early once `max_print - 1` significant saddles exist.
    #[must_use]
    pub fn with_max_print(mut self, max_print: usize) -> Self {
        self.max_print = max_print;
        self
    }

    /// Returns the configured output cap.
    #[must_use]
    pub fn max_print(&self) -> usize {
        self.max_print
    }

    /// Enables or disables pool and partition-sum accumulation on merges.
    #[must_use]
    pub fn with_pool_accounting(mut self, enabled: bool) -> Self {
        self.pool_accounting = enabled;
        self
    }

    /// Returns whether merges accumulate pools.
    #[must_use]
    pub fn pool_accounting(&self) -> bool {
        self.pool_accounting
    }

    /// Sets the thermal energy used for Boltzmann weights.
    ///
    /// # Examples
    /// ```
    /// use barriers_core::{BarrierBuilder, BarrierErrorCode};
    ///
    /// let err = BarrierBuilder::new().with_kt(0.0).build().expect_err("kT must be positive");
    /// assert_eq!(err.code(), BarrierErrorCode::InvalidTemperature);
    /// ```
    #[must_use]
    pub fn with_kt(mut self, kt: f64) -> Self {
        self.kt = kt;
        self
    }

    /// Returns the configured thermal energy.
    #[must_use]
    pub fn kt(&self) -> f64 {
        self.kt
    }

    /// Fixes the reference energy of the Boltzmann weights instead of taking
    /// the energy of the first record.
    #[must_use]
    pub fn with_reference_energy(mut self, energy: f64) -> Self {
        self.reference_energy = Some(energy);
        self
    }

    /// Returns the reference energy override, if any.
    #[must_use]
    pub fn reference_energy(&self) -> Option<f64> {
        self.reference_energy
    }

    /// Validates the configuration and constructs a [`Barriers`] instance.
    ///
    /// # Errors
    /// Returns [`BarrierError::InvalidTemperature`] unless `kT` is finite and
    /// positive, and [`BarrierError::InvalidThreshold`] unless `minh` is
    /// finite and non-negative.
    pub fn build(self) -> Result<Barriers> {
        if !(self.kt.is_finite() && self.kt > 0.0) {
            return Err(BarrierError::InvalidTemperature { kt: self.kt });
        }
        if !(self.minh.is_finite() && self.minh >= 0.0) {
            return Err(BarrierError::InvalidThreshold { minh: self.minh });
        }
        Ok(Barriers::new(
            self.minh,
            self.max_print,
            self.pool_accounting,
            self.kt,
            self.reference_energy,
        ))
    }
}

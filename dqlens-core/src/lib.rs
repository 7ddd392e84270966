// dqlens-core/src/lib.rs

// 1. Mandatory documentation for production code
#![allow(missing_docs)] // On autorise le manque de doc pour le moment

// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- MODULES HEXAGONAUX ---

// 1. Ports (Interfaces / Traits)
// Catalogue de tables, service de métriques.
pub mod ports;

// 2. Domain (Cœur du métier)
// Sélection, rapport, tiers de qualité, machine d'état du workflow.
// Ne dépend de RIEN d'autre (ni infra, ni app).
pub mod domain;

// 3. Infrastructure (Adapters)
// HTTP, DuckDB, fichier de config, rendu terminal / JSON.
pub mod infrastructure;

// 4. Application (Use Cases)
// Chargement du catalogue, fetch, présentation.
pub mod application;

// --- GESTION DES ERREURS GLOBALE ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use error::QualityError;

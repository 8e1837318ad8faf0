// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Data carried through an onboarding run.

pub mod credentials;
pub mod identity;

pub use credentials::{AccountToken, CredentialBundle};
pub use identity::{ClusterIdentity, GkeCluster};

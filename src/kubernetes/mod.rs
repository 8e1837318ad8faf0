// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for kubeconfig resolution, account provisioning, RBAC and token extraction.

pub mod kubeconfig;
pub mod namespaces;
pub mod rbac;
pub mod service_account;
pub mod token;

pub use kubeconfig::KubeContext;
pub use namespaces::require_namespace;
pub use rbac::{apply_binding, BindingKind, RbacBinding};
pub use service_account::create_service_account;
pub use token::read_account_token;

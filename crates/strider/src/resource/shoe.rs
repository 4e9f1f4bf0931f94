// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The shoe attribute catalog.
//!
//! Six attributes, all under the `shoe/` prefix:
//!
//! | Path | Methods | Default | Notes |
//! |------|---------|---------|-------|
//! | `shoe/data` | GET PUT DELETE | `Hello World!` | generic scratch attribute |
//! | `shoe/shoelace` | GET PUT | `untie` | lace state |
//! | `shoe/ledcolor` | GET PUT DELETE | `000000` | RGB hex |
//! | `shoe/steps` | GET DELETE | `0` | derived from the step counter |
//! | `shoe/size` | GET | `7.5MX` | immutable characteristic |
//! | `shoe/name` | GET PUT DELETE | `Empty` | display name |

use super::{Backing, MethodSet, ResourceSpec};
use crate::core::StepCounter;
use std::sync::Arc;

/// Generic scratch attribute path.
pub const DATA_PATH: &str = "shoe/data";
/// Lace-state attribute path.
pub const SHOELACE_PATH: &str = "shoe/shoelace";
/// LED color attribute path.
pub const LEDCOLOR_PATH: &str = "shoe/ledcolor";
/// Derived step-count attribute path.
pub const STEPS_PATH: &str = "shoe/steps";
/// Shoe size attribute path.
pub const SIZE_PATH: &str = "shoe/size";
/// Display name attribute path.
pub const NAME_PATH: &str = "shoe/name";

/// Default for `shoe/data`.
pub const DATA_DEFAULT: &[u8] = b"Hello World!";
/// Default for `shoe/shoelace`.
pub const SHOELACE_DEFAULT: &[u8] = b"untie";
/// Default for `shoe/ledcolor` (LED off).
pub const LEDCOLOR_DEFAULT: &[u8] = b"000000";
/// Default for `shoe/steps`.
pub const STEPS_DEFAULT: &[u8] = b"0";
/// The (fixed) shoe size.
pub const SIZE_VALUE: &[u8] = b"7.5MX";
/// Default for `shoe/name`.
pub const NAME_DEFAULT: &[u8] = b"Empty";

/// Build the full catalog, wiring the derived resource to `steps`.
#[must_use]
pub fn catalog(steps: &Arc<StepCounter>) -> Vec<ResourceSpec> {
    vec![
        ResourceSpec {
            name: DATA_PATH,
            methods: MethodSet::GET | MethodSet::PUT | MethodSet::DELETE,
            default: DATA_DEFAULT,
            backing: Backing::Stored,
        },
        ResourceSpec {
            name: SHOELACE_PATH,
            methods: MethodSet::GET | MethodSet::PUT,
            default: SHOELACE_DEFAULT,
            backing: Backing::Stored,
        },
        ResourceSpec {
            name: LEDCOLOR_PATH,
            methods: MethodSet::GET | MethodSet::PUT | MethodSet::DELETE,
            default: LEDCOLOR_DEFAULT,
            backing: Backing::Stored,
        },
        ResourceSpec {
            name: STEPS_PATH,
            methods: MethodSet::GET | MethodSet::DELETE,
            default: STEPS_DEFAULT,
            backing: Backing::Counter(Arc::clone(steps)),
        },
        ResourceSpec {
            name: SIZE_PATH,
            methods: MethodSet::GET,
            default: SIZE_VALUE,
            backing: Backing::Stored,
        },
        ResourceSpec {
            name: NAME_PATH,
            methods: MethodSet::GET | MethodSet::PUT | MethodSet::DELETE,
            default: NAME_DEFAULT,
            backing: Backing::Stored,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Method;

    #[test]
    fn test_catalog_has_six_resources() {
        let steps = Arc::new(StepCounter::new());
        let catalog = catalog(&steps);
        assert_eq!(catalog.len(), 6);
    }

    #[test]
    fn test_catalog_method_surface() {
        let steps = Arc::new(StepCounter::new());
        for spec in catalog(&steps) {
            match spec.name {
                SHOELACE_PATH => {
                    assert!(spec.methods.contains(Method::Put));
                    assert!(!spec.methods.contains(Method::Delete));
                }
                STEPS_PATH => {
                    assert!(!spec.methods.contains(Method::Put));
                    assert!(spec.methods.contains(Method::Delete));
                    assert!(matches!(spec.backing, Backing::Counter(_)));
                }
                SIZE_PATH => {
                    assert!(spec.methods.contains(Method::Get));
                    assert!(!spec.methods.contains(Method::Put));
                    assert!(!spec.methods.contains(Method::Delete));
                }
                _ => {
                    assert!(spec.methods.contains(Method::Get));
                    assert!(spec.methods.contains(Method::Put));
                    assert!(spec.methods.contains(Method::Delete));
                }
            }
        }
    }
}

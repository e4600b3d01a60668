//! # Tokenloom Resolve
//!
//! Loading and resolution of design-token documents. This crate turns one or
//! more JSON token documents into a fully concrete token tree.
//!
//! ## Usage
//!
//! ```
//! # use tokenloom_resolve::{error::{DiagnosticCollector, ResolveError}, load, resolve};
//! # use tokenloom_core::{path::TokenPath, value::TokenValue};
//!
//! fn main() -> Result<(), ResolveError> {
//!     let source = r##"{
//!         "Meta": { "FluentUITokensVersion": 0 },
//!         "Global": { "Color": { "Blue": { "value": "#0000ff" } } },
//!         "Set": { "Accent": { "aliasOf": "Global.Color.Blue" } }
//!     }"##;
//!
//!     let document = load::parse_document(source)?;
//!     let mut collector = DiagnosticCollector::new();
//!     let mut tree = load::classify(&document, &mut collector);
//!     resolve(&mut tree, None, &mut collector)?;
//!
//!     let accent = tree.get(&TokenPath::parse("Set.Accent").unwrap()).unwrap();
//!     assert_eq!(accent.value_ref(), Some(&TokenValue::String("#0000ff".into())));
//!     Ok(())
//! }
//! ```

pub mod aliases;
pub mod computed;
pub mod error;
pub mod generate;
pub mod load;
pub mod overrides;
pub mod walker;

use log::{debug, trace};

use tokenloom_core::{platform::Platform, tree::Node};

use error::{DiagnosticCollector, Result};

/// Runs every resolution pass over `tree`, in place.
///
/// The passes run in a fixed order:
///
/// 1. **Platform overrides** - Merge the entries for `platform`
/// 2. **Color ramps** - Expand `buildRampFrom` global colors
/// 3. **Generated sets** - Expand ramp directives
/// 4. **Aliases** - Replace aliases with copies of their targets
/// 5. **Computed values** - Compose colors with opacities
/// 6. **Shadow colors** - Resolve color references inside shadows
///
/// Data errors are reported to `collector` and leave `<ERROR: ...>` sentinel
/// values behind. After a successful run no alias, computed, or generated
/// node remains in the tree.
///
/// # Errors
///
/// Returns an error for an unknown generation type or a violated pass
/// precondition.
pub fn resolve(
    tree: &mut Node,
    platform: Option<Platform>,
    collector: &mut DiagnosticCollector,
) -> Result<()> {
    // Step 1: Platform overrides
    overrides::resolve_platform_overrides(tree, platform, collector)?;

    // Step 2: Color ramps
    generate::build_color_ramps(tree, collector)?;

    // Step 3: Generated sets
    generate::resolve_generated(tree, collector)?;

    // Step 4: Aliases
    aliases::resolve_aliases(tree, collector)?;

    // Step 5: Computed values
    computed::resolve_computed(tree, collector)?;

    // Step 6: Shadow colors
    aliases::resolve_shadow_colors(tree, collector)?;

    debug!(
        platform:? = platform,
        diagnostics = collector.diagnostics().len();
        "Token tree resolved"
    );
    trace!(tree:? = tree; "Resolved token tree");
    Ok(())
}

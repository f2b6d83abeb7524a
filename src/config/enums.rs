//! Configuration enum types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// What a box tool does when a pointer goes down while a drag is already active.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SecondPointerPolicy {
    /// Keep the current drag and drop the new press
    #[default]
    Ignore,
    /// End the current drag without creating a shape
    Cancel,
}

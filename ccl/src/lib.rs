//! Connected component labeling over arbitrary pixel neighborhoods.
//!
//! A binary [`Mask`] is split into connected components under either a fixed
//! 4/8-connectivity or any odd-sized [`Neighborhood`] kernel. Results come
//! back as a [`LabelMap`] whose labels run densely from 1, with 0 for
//! background.
//!
//! ```
//! use ccl::{label_four_connected, label_generic, Neighborhood};
//! use common::BitBuffer2;
//!
//! fn main() -> ccl::Result<()> {
//!     let mask = BitBuffer2::from_ascii("##.##");
//!     assert_eq!(label_four_connected(&mask).num_labels(), 2);
//!
//!     let wide = Neighborhood::horizontal(5)?;
//!     assert_eq!(label_generic(&mask, &wide)?.num_labels(), 1);
//!     Ok(())
//! }
//! ```

mod components;
pub mod config;
mod error;
mod labeling;
mod mask;
pub mod neighborhood;

#[cfg(test)]
pub(crate) mod testing;

pub use components::{Aabb, Component};
pub use config::{Config, LabelingMethod};
pub use error::{Error, Result};
pub use labeling::{
    compact_labels, label_eight_connected, label_four_connected, label_generic,
    label_union_find, label_with_config, Connectivity, LabelMap,
};
pub use mask::Mask;
pub use neighborhood::{Neighbor, Neighborhood};

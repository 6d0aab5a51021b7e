// =============================================================================
// Folio Web - Page Behaviors
// =============================================================================
// Table of Contents:
// 1. Layout Behaviors (footer, navigation)
// 2. Pointer Effects
// 3. Reveal Animations
// 4. Carousel & Forms
// =============================================================================

pub mod footer;
pub mod nav;
pub mod pointer;
pub mod counters;
pub mod skills;
pub mod carousel;
pub mod contact;

pub use carousel::{Carousel, SlideCursor};
pub use contact::ContactMessage;

// SPDX-License-Identifier: GPL-3.0-only

//! Backend abstraction layer for depth capture
//!
//! The tracking code only sees [`depth::DepthSource`]. Concrete sensors live
//! behind that trait:
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │          App Layer (fPOI processor)          │
//! └────────────────────┬────────────────────────┘
//!                      │ DepthFrame
//! ┌────────────────────┴────────────────────────┐
//! │              Backend Layer                   │
//! │  ┌─────────────┐    ┌──────────────────┐    │
//! │  │  Recording  │    │    Synthetic     │    │
//! │  │  (raw f32)  │    │ (orbiting target)│    │
//! │  └─────────────┘    └──────────────────┘    │
//! └─────────────────────────────────────────────┘
//! ```

pub mod depth;

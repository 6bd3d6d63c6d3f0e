//! Application layer use cases.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (pure rules in `arrow-clicker-core`) and the infrastructure (OS hooks,
//! `SendInput`, config files).  Code here:
//!
//! - **Orchestrates** the domain [`InputState`](arrow_clicker_core::InputState)
//!   to react to key events and timer ticks.
//! - **Depends on abstractions** ([`pointer::PointerInjector`],
//!   [`capture_keys::KeyboardHook`]) so the OS adapters can be replaced with
//!   test doubles.
//! - **Contains no OS calls**.
//!
//! # Sub-modules
//!
//! - **`shared_state`** – The lock-guarded `InputState` handle every task shares.
//! - **`pointer`** – The pointer-injection port.
//! - **`capture_keys`** – The keyboard-hook port and the allow/suppress verdict.
//! - **`toggle_mode`** – Mode switching with debounce and the release protocol.
//! - **`route_keys`** – The per-key suppression decision.  Runs on the OS
//!   input-delivery path for every keystroke on the system.
//! - **`drive_motion`** – The control loop and the motion driver.
//! - **`engine`** – `start()` / `stop()` lifecycle tying everything together.

pub mod capture_keys;
pub mod drive_motion;
pub mod engine;
pub mod pointer;
pub mod route_keys;
pub mod shared_state;
pub mod toggle_mode;

//! The two screens, one per [`Route`](qafeteria_core::Route).

pub mod home;
pub mod login;

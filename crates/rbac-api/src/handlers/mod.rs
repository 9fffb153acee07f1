//! HTTP handlers

pub mod group;
pub mod group_permission;
pub mod group_user;
pub mod health;

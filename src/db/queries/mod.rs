pub mod economy;
pub mod reaction_roles;
pub mod shop;
pub mod warns;

pub(crate) mod component;
pub(crate) mod render_loop;
pub(crate) mod surface_manager;

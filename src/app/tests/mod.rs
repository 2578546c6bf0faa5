mod host_flow;
mod terminal_surface;

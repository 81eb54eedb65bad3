pub mod auth_service;
pub use auth_service::{AuthError, AuthService};

pub mod auth_service_impl;
pub use auth_service_impl::SeaOrmAuthService;

pub mod movie_service;
pub use movie_service::{MovieError, MovieService};

pub mod movie_service_impl;
pub use movie_service_impl::SeaOrmMovieService;

/// Pages the shell can dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Employees,
    Projects,
}

pub const HOME_PATH: &str = "/";
pub const EMPLOYEES_PATH: &str = "/funcionarios";
pub const PROJECTS_PATH: &str = "/projetos";

impl Route {
    /// Resolve a path. The entity pages also match any sub-path below them.
    pub fn from_path(path: &str) -> Option<Route> {
        if path == HOME_PATH {
            return Some(Route::Home);
        }
        if matches_prefix(path, EMPLOYEES_PATH) {
            return Some(Route::Employees);
        }
        if matches_prefix(path, PROJECTS_PATH) {
            return Some(Route::Projects);
        }
        None
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => HOME_PATH,
            Route::Employees => EMPLOYEES_PATH,
            Route::Projects => PROJECTS_PATH,
        }
    }
}

fn matches_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

//! Route table for the GitHub views
//!
//! A route is a GitHub-style path: `user` lists a user's repositories and
//! `user/repo` searches one repository. Routes are matched in table order, so
//! the literal `about` wins over a user named "about".

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Home,
    /// `/about`
    About,
    /// `/:user`
    UserRepositories { user: String },
    /// `/:user/:repo`
    SearchResult { user: String, repo: String },
    /// Anything else
    NotFound { path: String },
}

impl Route {
    /// Match a path against the route table.
    ///
    /// Leading and trailing slashes are optional and empty segments are
    /// ignored, so `"octocat/"`, `"/octocat"` and `"octocat"` are the same.
    ///
    /// # Examples
    ///
    /// ```
    /// use commentscan::route::Route;
    ///
    /// assert_eq!(Route::parse("/"), Route::Home);
    /// assert_eq!(
    ///     Route::parse("octocat/hello-world"),
    ///     Route::SearchResult { user: "octocat".into(), repo: "hello-world".into() }
    /// );
    /// ```
    pub fn parse(path: &str) -> Self {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Home,
            ["about"] => Route::About,
            [user] => Route::UserRepositories {
                user: (*user).to_string(),
            },
            [user, repo] => Route::SearchResult {
                user: (*user).to_string(),
                repo: (*repo).to_string(),
            },
            _ => Route::NotFound {
                path: path.to_string(),
            },
        }
    }

    /// Name of the route as registered in the table.
    pub fn name(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::About => "about",
            Route::UserRepositories { .. } => "UserRepositories",
            Route::SearchResult { .. } => "SearchResult",
            Route::NotFound { .. } => "PageNotFound",
        }
    }

    /// Title shown above the view.
    pub fn title(&self) -> String {
        match self {
            Route::Home => "Home".to_string(),
            Route::About => "About".to_string(),
            Route::UserRepositories { .. } => "Repositories".to_string(),
            Route::SearchResult { user, repo } => format!("Search {}/{}", user, repo),
            Route::NotFound { .. } => "Error 404".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::About => write!(f, "/about"),
            Route::UserRepositories { user } => write!(f, "/{}", user),
            Route::SearchResult { user, repo } => write!(f, "/{}/{}", user, repo),
            Route::NotFound { path } => write!(f, "{}", path),
        }
    }
}

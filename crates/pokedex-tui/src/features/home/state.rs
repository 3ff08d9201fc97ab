use pokedex_core::session::User;

/// Home shell state: the fetched profile, if any.
///
/// A failed profile fetch leaves both fields at their defaults: no email in
/// the header and no admin badge.
#[derive(Debug, Default)]
pub struct HomeState {
    pub user: Option<User>,
    pub is_admin: bool,
}

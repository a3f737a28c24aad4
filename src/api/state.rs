use crate::tournament::Tournament;

#[derive(Clone)]
pub struct AppState {
    pub tournament: Tournament,
    pub cors_origin: String,
}

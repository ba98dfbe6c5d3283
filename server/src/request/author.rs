use application::transfer::GetAuthorDto;

use crate::controller::Intake;

#[derive(Debug)]
pub struct GetAuthorRequest {
    id: i64,
}

impl GetAuthorRequest {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

pub struct AuthorTransformer;

impl Intake<GetAuthorRequest> for AuthorTransformer {
    type To = GetAuthorDto;
    fn emit(&self, input: GetAuthorRequest) -> Self::To {
        GetAuthorDto { id: input.id }
    }
}

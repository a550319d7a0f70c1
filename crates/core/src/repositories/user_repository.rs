use diesel::prelude::*;
use sawari_primitives::error::ApiError;
use sawari_primitives::models::entities::user::User;
use sawari_primitives::schema::users;
use uuid::Uuid;

pub struct UserRepository;

impl UserRepository {
    pub fn find_by_id(conn: &mut PgConnection, id: Uuid) -> Result<Option<User>, ApiError> {
        users::table
            .find(id)
            .first::<User>(conn)
            .optional()
            .map_err(ApiError::from)
    }
}

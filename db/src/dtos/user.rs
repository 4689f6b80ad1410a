pub struct UserCreateRequest {
    pub email: String,
    pub display_name: String,
    pub is_filmmaker: bool,
}

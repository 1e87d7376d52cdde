use crate::model::id::AdminId;
use derive_new::new;

#[derive(new)]
pub struct CreateToken {
    pub admin_id: AdminId,
}

use sea_orm::EntityTrait;

/// Converts request parameters into an insertable or patchable active model.
pub trait ToActiveModel<E>
where
    E: EntityTrait,
{
    fn to_active_model(self) -> E::ActiveModel;
}

use crate::convert::{FromDbModel, FromModel};
use intake_config::catalog::question::Gender;
use intake_entity::client::Gender as GenderModel;

impl FromDbModel<GenderModel> for Option<Gender> {
    fn from_db_model(model: GenderModel) -> Self {
        match model {
            GenderModel::Other => None,
            GenderModel::Male => Some(Gender::Male),
            GenderModel::Female => Some(Gender::Female),
        }
    }
}

impl FromModel<Option<Gender>> for GenderModel {
    fn from_model(model: Option<Gender>) -> Self {
        match model {
            None => Self::Other,
            Some(Gender::Male) => Self::Male,
            Some(Gender::Female) => Self::Female,
        }
    }
}

use crate::convert::{FromDbModel, FromModel, IntoModel, TryFromDbModel};
use crate::error::Error;
use intake_entity::response::{Model as ResponseModel, ResponseSource};
use intake_model::response::{EffectiveResponse, Source};

impl FromDbModel<ResponseSource> for Source {
    fn from_db_model(model: ResponseSource) -> Self {
        match model {
            ResponseSource::Manual => Self::Manual,
            ResponseSource::AiAssisted => Self::AiAssisted,
            ResponseSource::Imported => Self::Imported,
        }
    }
}

impl FromModel<Source> for ResponseSource {
    fn from_model(model: Source) -> Self {
        match model {
            Source::Manual => Self::Manual,
            Source::AiAssisted => Self::AiAssisted,
            Source::Imported => Self::Imported,
        }
    }
}

impl TryFromDbModel<ResponseModel> for EffectiveResponse {
    type Error = Error;

    fn try_from_db_model(model: ResponseModel) -> Result<Self, Self::Error> {
        Ok(Self {
            question_id: model.question_id,
            value: serde_json::from_value(model.value)?,
            source: model.source.into_model(),
            recorded_at: model.recorded_at.and_utc(),
        })
    }
}

use crate::model::MediaFile;
use serde::Serialize;

#[derive(Debug, Serialize, Default)]
pub struct APIResponse {
    pub status: String,
    pub media: Vec<MediaFile>,
}

impl APIResponse {
    pub fn new_from_msg(msg: &str) -> Self {
        return APIResponse {
            status: msg.to_owned(),
            media: vec![],
        };
    }

    pub fn new(msg: Option<&str>, media: Option<Vec<MediaFile>>) -> Self {
        let media = match media {
            Some(media) => media,
            None => vec![],
        };

        let msg = match msg {
            Some(msg) => msg,
            None => "",
        };

        return APIResponse {
            status: msg.to_owned(),
            media,
        };
    }
}

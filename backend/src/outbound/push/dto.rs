//! Request body sent to the push provider.

use serde::Serialize;
use url::Url;

use crate::domain::PushMessage;

#[derive(Debug, Serialize)]
pub(super) struct LocalisedTextDto<'a> {
    pub(super) en: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct PushPayloadDto<'a> {
    pub(super) app_id: &'a str,
    pub(super) include_external_user_ids: [&'a str; 1],
    pub(super) headings: LocalisedTextDto<'a>,
    pub(super) contents: LocalisedTextDto<'a>,
    pub(super) web_url: String,
}

impl<'a> PushPayloadDto<'a> {
    pub(super) fn from_message(app_id: &'a str, frontend: &Url, message: &'a PushMessage) -> Self {
        Self {
            app_id,
            include_external_user_ids: [message.recipient.as_str()],
            headings: LocalisedTextDto { en: &message.title },
            contents: LocalisedTextDto { en: &message.body },
            web_url: patient_link(frontend, &message.admission_no),
        }
    }
}

/// Deep link into the frontend's patient view for one admission.
pub(super) fn patient_link(frontend: &Url, admission_no: &str) -> String {
    let mut link = frontend.clone();
    let base_path = link.path().trim_end_matches('/').to_owned();
    link.set_path(&format!("{base_path}/patients"));
    link.query_pairs_mut()
        .clear()
        .append_pair("no_rawat", admission_no);
    link.to_string()
}

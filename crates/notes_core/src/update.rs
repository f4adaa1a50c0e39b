use crate::{AppState, DownloadOutcome, Effect, Msg, RequestOutcome, ARTIFACT_FILENAME};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(value) => {
            state.set_input(value);
            Vec::new()
        }
        Msg::SubmitClicked => {
            // A submit while pending supersedes the running request; its
            // settlement will carry a stale token and be dropped.
            let token = state.begin_request();
            vec![Effect::SubmitVideo {
                token,
                video_url: state.input().to_string(),
            }]
        }
        Msg::RequestSettled { token, outcome } => {
            let result = match outcome {
                RequestOutcome::Completed(result) => Some(result),
                RequestOutcome::Failed => None,
            };
            state.settle_request(token, result);
            Vec::new()
        }
        Msg::NoticeDismissed => {
            state.dismiss_notice();
            Vec::new()
        }
        Msg::DownloadClicked => match state.begin_download() {
            Some((token, url)) => vec![Effect::DownloadArtifact {
                token,
                url,
                file_name: ARTIFACT_FILENAME.to_string(),
            }],
            None => Vec::new(),
        },
        Msg::DownloadSettled { token, outcome } => {
            let path = match outcome {
                DownloadOutcome::Saved { path } => Some(path),
                DownloadOutcome::Failed => None,
            };
            state.settle_download(token, path);
            Vec::new()
        }
    };

    (state, effects)
}

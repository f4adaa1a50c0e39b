use iced::widget::{button, column, container, row, scrollable, text, text_input, Column};
use iced::{Element, Length};
use notes_core::{
    AppViewModel, ResultsView, APP_TITLE, DOWNLOAD_LABEL, INPUT_PLACEHOLDER, SUMMARY_HEADING,
};

use super::constants::*;

/// Builds the window contents from the view model. No state lives here.
pub fn render<'a>(view: &AppViewModel) -> Element<'a, notes_core::Msg> {
    let content = match &view.notice {
        Some(notice) => render_notice(notice),
        None => render_form(view),
    };

    container(content)
        .padding(PADDING)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn render_form<'a>(view: &AppViewModel) -> Element<'a, notes_core::Msg> {
    let input = text_input(INPUT_PLACEHOLDER, &view.input)
        .on_input(notes_core::Msg::InputChanged)
        .padding(8);

    // Without `on_press` the button renders disabled.
    let mut submit = button(text(view.submit_label()));
    if view.submit_enabled {
        submit = submit.on_press(notes_core::Msg::SubmitClicked);
    }

    let mut form = Column::new()
        .spacing(SPACING)
        .push(text(APP_TITLE).size(TITLE_SIZE))
        .push(input)
        .push(submit);

    if let Some(results) = &view.results {
        form = form.push(render_results(results, view.download_status.as_deref()));
    }

    scrollable(form).into()
}

fn render_results<'a>(results: &ResultsView, status: Option<&str>) -> Element<'a, notes_core::Msg> {
    let mut block = column![
        text(SUMMARY_HEADING).size(HEADING_SIZE),
        text(results.summary.clone()),
    ]
    .spacing(SPACING);

    if let Some(link) = &results.download {
        let mut download = button(text(DOWNLOAD_LABEL)).style(button::text);
        if link.enabled {
            download = download.on_press(notes_core::Msg::DownloadClicked);
        }
        block = block.push(
            row![
                download,
                text(format!("saves as {}", link.file_name)).size(STATUS_SIZE),
            ]
            .spacing(SPACING),
        );
        if let Some(status) = status {
            block = block.push(text(status.to_string()).size(STATUS_SIZE));
        }
    }

    container(block).padding(PADDING).into()
}

fn render_notice<'a>(notice: &str) -> Element<'a, notes_core::Msg> {
    column![
        text(notice.to_string()),
        button(text("OK")).on_press(notes_core::Msg::NoticeDismissed),
    ]
    .spacing(SPACING)
    .into()
}

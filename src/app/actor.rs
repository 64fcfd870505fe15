//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::ui_events::InputMode;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        state: AppState,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state,
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Send initial render state
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    self.state.handle_response(response);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    fn dispatch(&self, cmd: Option<NetworkCommand>) {
        if let Some(cmd) = cmd {
            let _ = self.network_tx.send(cmd);
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Grid
            UiEvent::Activate(label) => {
                let cmd = self.state.activate_control(label);
                self.dispatch(cmd);
            }
            UiEvent::ActivateSelected => {
                let cmd = self.state.activate_selected();
                self.dispatch(cmd);
            }
            UiEvent::ActivateIndex(index) => {
                let cmd = self.state.activate_index(index);
                self.dispatch(cmd);
            }
            UiEvent::MoveSelection(direction) => self.state.move_selection(direction),

            // Expression field
            UiEvent::StartEditing => self.state.start_editing(),
            UiEvent::StopEditing => self.state.stop_editing(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::ClearInput => self.state.clear_input(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),

            // Evaluation
            UiEvent::Submit => {
                if self.state.input_mode == InputMode::Editing {
                    self.state.stop_editing();
                }
                let cmd = self.state.submit();
                self.dispatch(cmd);
            }
            UiEvent::CancelEvaluation => {
                let cmd = self.state.cancel_evaluation();
                self.dispatch(cmd);
            }

            // History
            UiEvent::HistoryPrev => self.state.history_prev(),
            UiEvent::HistoryNext => self.state.history_next(),

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_button_presses_reach_network() {
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (_net_resp_tx, net_resp_rx) = mpsc::unbounded_channel();
        let (net_tx, mut net_rx) = mpsc::unbounded_channel();
        let (render_tx, mut render_rx) = mpsc::unbounded_channel();

        let actor = AppActor::new(AppState::new(), net_tx, render_tx);
        let handle = tokio::spawn(actor.run(ui_rx, net_resp_rx));

        for label in ["1", "+", "1", "="] {
            ui_tx.send(UiEvent::Activate(label)).unwrap();
        }
        let cmd = net_rx.recv().await.unwrap();
        assert_eq!(cmd, NetworkCommand::Evaluate { id: 1, expression: "1+1".into() });

        ui_tx.send(UiEvent::Quit).unwrap();
        assert_eq!(net_rx.recv().await, Some(NetworkCommand::Shutdown));
        handle.await.unwrap();

        let mut last = None;
        while let Ok(state) = render_rx.try_recv() {
            last = Some(state);
        }
        let last = last.unwrap();
        assert_eq!(last.expression, "1+1");
        assert!(last.is_pending);
    }

    #[tokio::test]
    async fn test_response_updates_render_state() {
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel();
        let (net_tx, mut net_rx) = mpsc::unbounded_channel();
        let (render_tx, mut render_rx) = mpsc::unbounded_channel();

        let mut state = AppState::new();
        state.set_expression("2+2");
        let actor = AppActor::new(state, net_tx, render_tx);
        let handle = tokio::spawn(actor.run(ui_rx, net_resp_rx));

        ui_tx.send(UiEvent::Submit).unwrap();
        let id = match net_rx.recv().await {
            Some(NetworkCommand::Evaluate { id, .. }) => id,
            other => panic!("unexpected {other:?}"),
        };
        net_resp_tx
            .send(NetworkResponse::Evaluated { id, value: "4".into(), time_ms: 3 })
            .unwrap();

        loop {
            let state = render_rx.recv().await.unwrap();
            if state.result == "4" {
                assert_eq!(state.expression, "2+2");
                assert!(!state.is_pending);
                break;
            }
        }

        drop(ui_tx);
        drop(net_resp_tx);
        handle.await.unwrap();
    }
}

use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted => {
            // A remount while requests are still out must not let them land
            // in the new container.
            let was_mounted = state.is_mounted();
            let generation = state.mount();
            let mut effects = Vec::with_capacity(2);
            if was_mounted {
                effects.push(Effect::CancelInFlight);
            }
            effects.push(Effect::LoadJobs { generation });
            effects
        }
        Msg::Unmounted => {
            if state.is_mounted() {
                state.unmount();
                vec![Effect::CancelInFlight]
            } else {
                Vec::new()
            }
        }
        Msg::FieldChanged { field, value } => {
            state.form_mut().on_field_change(field, value);
            Vec::new()
        }
        Msg::FocusNext => {
            state.form_mut().focus_next();
            Vec::new()
        }
        Msg::FocusPrev => {
            state.form_mut().focus_prev();
            Vec::new()
        }
        Msg::CycleStatus => {
            state.form_mut().cycle_status();
            Vec::new()
        }
        Msg::FormSubmitted => {
            if !state.is_mounted() {
                return (state, Vec::new());
            }
            let mut submitted = None;
            state.form_mut().on_submit(|job| submitted = Some(job));
            match submitted {
                Some(job) => {
                    let request_id = state.begin_submission();
                    vec![Effect::CreateJob {
                        generation: state.generation(),
                        request_id,
                        job,
                    }]
                }
                None => Vec::new(),
            }
        }
        Msg::DismissError => {
            state.dismiss_submit_error();
            Vec::new()
        }
        Msg::JobsLoaded { generation, result } => {
            state.apply_loaded(generation, result);
            Vec::new()
        }
        Msg::JobCreated {
            generation,
            request_id,
            result,
        } => {
            state.apply_created(generation, request_id, result);
            Vec::new()
        }
    };

    (state, effects)
}

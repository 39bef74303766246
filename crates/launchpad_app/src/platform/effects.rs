use launchpad_core::{Effect, LaunchLinks, LaunchRecord, Msg, PageOutcome};
use launchpad_engine::{EngineEvent, EngineHandle, LaunchDto, PageQuery};
use launchpad_logging::{launch_debug, launch_info};

use super::persistence::ThemeStore;

/// Executes core effects against the engine and the theme store, and turns
/// engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
    theme_store: Box<dyn ThemeStore>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, theme_store: Box<dyn ThemeStore>) -> Self {
        Self {
            engine,
            theme_store,
        }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchPage(request) => {
                    launch_info!(
                        "FetchPage request_id={} page={} limit={} offset={}",
                        request.request_id,
                        request.page,
                        request.limit,
                        request.offset
                    );
                    self.engine.fetch_page(
                        request.request_id,
                        PageQuery {
                            limit: request.limit,
                            offset: request.offset,
                        },
                    );
                }
                Effect::PersistTheme(theme) => self.theme_store.save(theme),
            }
        }
    }

    /// Drains completed engine work without blocking.
    pub fn poll(&self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            inbox.push(map_event(event));
        }
        inbox
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PageFetched {
            request_id,
            query,
            result,
        } => {
            let outcome = match result {
                Ok(page) => {
                    launch_debug!(
                        "request {} returned {} launches at offset {}",
                        request_id,
                        page.len(),
                        query.offset
                    );
                    PageOutcome::Loaded(page.into_iter().map(map_launch).collect())
                }
                Err(err) => PageOutcome::Failed(err.to_string()),
            };
            Msg::PageLoaded {
                request_id,
                outcome,
            }
        }
    }
}

fn map_launch(dto: LaunchDto) -> LaunchRecord {
    LaunchRecord {
        flight_number: dto.flight_number,
        mission_name: dto.mission_name,
        launch_year: dto.launch_year,
        details: dto.details,
        launch_success: dto.launch_success.unwrap_or(false),
        links: LaunchLinks {
            mission_patch_small: dto.links.mission_patch_small,
            video_link: dto.links.video_link,
        },
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    use launchpad_core::{Effect, Msg, PageOutcome, PageRequest, Theme};
    use launchpad_engine::{
        EngineEvent, EngineHandle, FailureKind, FetchError, LaunchDto, LaunchFetcher, LinksDto,
        PageQuery,
    };

    use super::{map_event, EffectRunner};
    use crate::platform::persistence::ThemeStore;

    struct RecordingStore {
        saved: Arc<Mutex<Vec<Theme>>>,
    }

    impl ThemeStore for RecordingStore {
        fn load(&self) -> Theme {
            Theme::Light
        }

        fn save(&self, theme: Theme) {
            self.saved.lock().unwrap().push(theme);
        }
    }

    struct OnePageFetcher;

    #[async_trait::async_trait]
    impl LaunchFetcher for OnePageFetcher {
        async fn fetch_page(&self, query: PageQuery) -> Result<Vec<LaunchDto>, FetchError> {
            if query.offset > 0 {
                return Ok(Vec::new());
            }
            Ok(vec![dto(1, None)])
        }
    }

    fn dto(flight_number: u64, success: Option<bool>) -> LaunchDto {
        LaunchDto {
            flight_number,
            mission_name: "DemoSat".to_string(),
            launch_year: "2007".to_string(),
            details: Some("Second stage roll".to_string()),
            launch_success: success,
            links: LinksDto {
                mission_patch_small: None,
                video_link: Some("https://www.youtube.com/watch?v=Lk4zQ2wP-Nc".to_string()),
            },
        }
    }

    fn runner(saved: Arc<Mutex<Vec<Theme>>>) -> EffectRunner {
        let engine = EngineHandle::with_fetcher(Arc::new(OnePageFetcher), Duration::ZERO).unwrap();
        EffectRunner::new(engine, Box::new(RecordingStore { saved }))
    }

    #[test]
    fn null_success_maps_to_failure() {
        let msg = map_event(EngineEvent::PageFetched {
            request_id: 3,
            query: PageQuery { limit: 10, offset: 20 },
            result: Ok(vec![dto(5, None), dto(6, Some(true))]),
        });

        let Msg::PageLoaded {
            request_id,
            outcome: PageOutcome::Loaded(records),
        } = msg
        else {
            panic!("expected a loaded page");
        };
        assert_eq!(request_id, 3);
        assert!(!records[0].launch_success);
        assert!(records[1].launch_success);
        assert_eq!(records[0].details.as_deref(), Some("Second stage roll"));
        assert!(records[0].links.video_link.is_some());
    }

    #[test]
    fn fetch_errors_become_failed_outcomes() {
        let msg = map_event(EngineEvent::PageFetched {
            request_id: 4,
            query: PageQuery { limit: 10, offset: 0 },
            result: Err(FetchError::new(FailureKind::HttpStatus(502), "502 Bad Gateway")),
        });
        assert_eq!(
            msg,
            Msg::PageLoaded {
                request_id: 4,
                outcome: PageOutcome::Failed("http status 502: 502 Bad Gateway".to_string()),
            }
        );
    }

    #[test]
    fn persist_theme_reaches_store() {
        let saved = Arc::new(Mutex::new(Vec::new()));
        let runner = runner(saved.clone());
        runner.run(vec![
            Effect::PersistTheme(Theme::Dark),
            Effect::PersistTheme(Theme::Light),
        ]);
        assert_eq!(*saved.lock().unwrap(), vec![Theme::Dark, Theme::Light]);
    }

    #[test]
    fn fetch_effect_round_trips_through_engine() {
        let runner = runner(Arc::new(Mutex::new(Vec::new())));
        runner.run(vec![Effect::FetchPage(PageRequest::for_page(9, 1))]);

        let deadline = Instant::now() + Duration::from_secs(5);
        let msgs = loop {
            let msgs = runner.poll();
            if !msgs.is_empty() || Instant::now() > deadline {
                break msgs;
            }
            std::thread::sleep(Duration::from_millis(5));
        };

        assert_eq!(msgs.len(), 1);
        match &msgs[0] {
            Msg::PageLoaded {
                request_id: 9,
                outcome: PageOutcome::Loaded(records),
            } => assert_eq!(records[0].flight_number, 1),
            other => panic!("unexpected message {other:?}"),
        }
    }
}

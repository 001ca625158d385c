//! 活动图片与外部图片解析
//!
//! `CampaignImage` 要么直接给出 URL，要么给出一个需要解析的外部页面地址。
//! 解析状态由 `ImageFallbackState` 持有，配合 `RequestTracker` 丢弃过期结果。

use crate::query::{RequestTracker, Ticket};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cell::RefCell;
use std::fmt::Display;

/// 活动图片引用
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "url", rename_all = "snake_case")]
pub enum CampaignImage {
    /// 可直接显示的图片地址
    Direct(Cow<'static, str>),
    /// 外部页面地址，需要解析出展示图
    External(Cow<'static, str>),
}

impl CampaignImage {
    pub fn direct_url(&self) -> Option<&str> {
        match self {
            CampaignImage::Direct(url) => Some(url),
            CampaignImage::External(_) => None,
        }
    }

    pub fn external_url(&self) -> Option<&str> {
        match self {
            CampaignImage::Direct(_) => None,
            CampaignImage::External(url) => Some(url),
        }
    }
}

/// 图片解析器
///
/// `(?Send)`：WASM 下的 future 不是 Send 的
#[async_trait::async_trait(?Send)]
pub trait ImageResolver {
    type Error: Display;

    /// 解析外部地址，返回可显示的图片 URL（没有则为 None）
    async fn resolve(&self, external_url: &str) -> Result<Option<String>, Self::Error>;
}

/// 对外暴露的快照：`{ url, loading }`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageFallback {
    pub url: Option<String>,
    pub loading: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ImageFallbackState {
    tracker: RequestTracker,
    url: Option<String>,
    loading: bool,
}

impl ImageFallbackState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 输入变化时调用
    ///
    /// 输入为空（或全是空白）时立即回到 `{ None, false }` 且不发起请求；
    /// 否则进入加载状态并返回本次请求的票据与待解析地址。
    pub fn begin(&mut self, input: Option<&str>) -> Option<(Ticket, String)> {
        self.url = None;
        match input.map(str::trim).filter(|s| !s.is_empty()) {
            None => {
                self.tracker.invalidate();
                self.loading = false;
                None
            }
            Some(url) => {
                self.loading = true;
                Some((self.tracker.issue(), url.to_string()))
            }
        }
    }

    /// 请求完成时调用，过期票据的结果被丢弃并返回 false
    pub fn finish(&mut self, ticket: Ticket, resolved: Option<String>) -> bool {
        if !self.tracker.is_current(ticket) {
            return false;
        }
        self.url = resolved;
        self.loading = false;
        true
    }

    /// 组件卸载：在途请求全部作废
    pub fn cancel(&mut self) {
        self.tracker.invalidate();
        self.loading = false;
    }

    pub fn snapshot(&self) -> ImageFallback {
        ImageFallback {
            url: self.url.clone(),
            loading: self.loading,
        }
    }
}

/// 驱动一次解析
///
/// 借用只在同步片段内持有，await 期间其它调用可以更新同一个状态。
/// 解析失败视为没有图片，不向上抛出。
/// `publish` 在进入加载状态和结果被采纳时各调用一次，过期结果不会触发。
pub async fn load_image<R: ImageResolver>(
    state: &RefCell<ImageFallbackState>,
    resolver: &R,
    input: Option<&str>,
    publish: impl Fn(ImageFallback),
) -> ImageFallback {
    let begun = state.borrow_mut().begin(input);
    publish(state.borrow().snapshot());
    let Some((ticket, url)) = begun else {
        return state.borrow().snapshot();
    };

    let resolved = resolver.resolve(&url).await.unwrap_or(None);
    let accepted = state.borrow_mut().finish(ticket, resolved);
    let snapshot = state.borrow().snapshot();
    if accepted {
        publish(snapshot.clone());
    }
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct MockResolver {
        calls: Cell<usize>,
        answer: Result<Option<String>, String>,
        /// 解析过程中观察到的 loading 标志
        observed_loading: RefCell<Vec<bool>>,
        state: Rc<RefCell<ImageFallbackState>>,
    }

    impl MockResolver {
        fn new(state: Rc<RefCell<ImageFallbackState>>, answer: Result<Option<String>, String>) -> Self {
            Self {
                calls: Cell::new(0),
                answer,
                observed_loading: RefCell::new(Vec::new()),
                state,
            }
        }
    }

    #[async_trait::async_trait(?Send)]
    impl ImageResolver for MockResolver {
        type Error = String;

        async fn resolve(&self, _external_url: &str) -> Result<Option<String>, String> {
            self.calls.set(self.calls.get() + 1);
            self.observed_loading
                .borrow_mut()
                .push(self.state.borrow().snapshot().loading);
            self.answer.clone()
        }
    }

    #[tokio::test]
    async fn test_null_input_never_fetches() {
        let state = Rc::new(RefCell::new(ImageFallbackState::new()));
        let resolver = MockResolver::new(state.clone(), Ok(Some("x".into())));

        let result = load_image(&state, &resolver, None, |_| {}).await;
        assert_eq!(result, ImageFallback { url: None, loading: false });

        let blank = load_image(&state, &resolver, Some("  "), |_| {}).await;
        assert_eq!(blank, ImageFallback { url: None, loading: false });
        assert_eq!(resolver.calls.get(), 0);
    }

    #[tokio::test]
    async fn test_loading_until_resolution_completes() {
        let state = Rc::new(RefCell::new(ImageFallbackState::new()));
        let resolver = MockResolver::new(
            state.clone(),
            Ok(Some("https://cdn.example.org/iftar.jpg".into())),
        );

        let published = RefCell::new(Vec::new());
        let result = load_image(
            &state,
            &resolver,
            Some("https://campaigns.example.org/iftar"),
            |snapshot| published.borrow_mut().push(snapshot),
        )
        .await;

        assert_eq!(*resolver.observed_loading.borrow(), vec![true]);
        assert_eq!(
            *published.borrow(),
            vec![
                ImageFallback { url: None, loading: true },
                result.clone(),
            ]
        );
        assert_eq!(
            result,
            ImageFallback {
                url: Some("https://cdn.example.org/iftar.jpg".into()),
                loading: false
            }
        );
    }

    #[tokio::test]
    async fn test_resolution_failure_leaves_placeholder() {
        let state = Rc::new(RefCell::new(ImageFallbackState::new()));
        let resolver = MockResolver::new(state.clone(), Err("502".into()));

        let result = load_image(&state, &resolver, Some("https://campaigns.example.org/x"), |_| {}).await;
        assert_eq!(result, ImageFallback { url: None, loading: false });
        assert_eq!(resolver.calls.get(), 1);
    }

    #[tokio::test]
    async fn test_cancelled_load_publishes_nothing_after_start() {
        let state = Rc::new(RefCell::new(ImageFallbackState::new()));

        // 解析进行中组件被卸载
        struct CancellingResolver(Rc<RefCell<ImageFallbackState>>);

        #[async_trait::async_trait(?Send)]
        impl ImageResolver for CancellingResolver {
            type Error = String;

            async fn resolve(&self, _external_url: &str) -> Result<Option<String>, String> {
                self.0.borrow_mut().cancel();
                Ok(Some("late.jpg".into()))
            }
        }

        let published = RefCell::new(Vec::new());
        let result = load_image(
            &state,
            &CancellingResolver(state.clone()),
            Some("https://campaigns.example.org/x"),
            |snapshot| published.borrow_mut().push(snapshot),
        )
        .await;

        assert_eq!(published.borrow().len(), 1);
        assert_eq!(result, ImageFallback { url: None, loading: false });
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut state = ImageFallbackState::new();
        let (old, _) = state.begin(Some("https://a.example.org")).unwrap();
        let (new, url) = state.begin(Some("https://b.example.org")).unwrap();
        assert_eq!(url, "https://b.example.org");

        // 旧请求晚到
        assert!(!state.finish(old, Some("a.jpg".into())));
        assert!(state.snapshot().loading);

        assert!(state.finish(new, Some("b.jpg".into())));
        assert_eq!(state.snapshot().url.as_deref(), Some("b.jpg"));
        assert!(!state.snapshot().loading);
    }

    #[test]
    fn test_switching_to_null_cancels_in_flight_request() {
        let mut state = ImageFallbackState::new();
        let (ticket, _) = state.begin(Some("https://a.example.org")).unwrap();
        assert!(state.begin(None).is_none());

        assert!(!state.finish(ticket, Some("a.jpg".into())));
        assert_eq!(state.snapshot(), ImageFallback::default());
    }

    #[test]
    fn test_cancel_on_unmount() {
        let mut state = ImageFallbackState::new();
        let (ticket, _) = state.begin(Some("https://a.example.org")).unwrap();
        state.cancel();
        assert!(!state.finish(ticket, Some("a.jpg".into())));
        assert!(!state.snapshot().loading);
    }

    #[test]
    fn test_campaign_image_accessors() {
        let direct = CampaignImage::Direct("/images/iftar.jpg".into());
        assert_eq!(direct.direct_url(), Some("/images/iftar.jpg"));
        assert_eq!(direct.external_url(), None);

        let external = CampaignImage::External("https://campaigns.example.org/iftar".into());
        assert_eq!(external.direct_url(), None);
        assert_eq!(external.external_url(), Some("https://campaigns.example.org/iftar"));
    }
}

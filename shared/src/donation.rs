//! 捐赠向导状态机
//!
//! 步骤严格线性：金额 → 捐赠者信息 → 支付 → 完成。
//! 只有 `advance` / 支付成功能向前，只有 `back` 能向后，支付步骤不可跳过。
//!
//! 会话创建是异步的。`begin_checkout` 发出票据，`attach_session` /
//! `checkout_failed` 只接受当前票据，用户在请求途中返回上一步时，晚到的结果会被丢弃。

use crate::auth::AuthUser;
use crate::payment::PaymentSessionProvider;
use crate::protocol::{CheckoutSession, CreateCheckoutSessionRequest, SessionStatus};
use crate::query::{RequestTracker, Ticket};
use crate::validation::{ValidationError, parse_amount, validate_email};
use crate::{Amount, DonationFrequency, DonorDetails, MIN_CHARGE_CENTS};
use thiserror::Error;

/// 预设金额（美元）
pub const PRESET_AMOUNTS: [Amount; 5] = [
    Amount::from_dollars(25),
    Amount::from_dollars(50),
    Amount::from_dollars(100),
    Amount::from_dollars(250),
    Amount::from_dollars(500),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DonationStep {
    #[default]
    Amount,
    Details,
    Payment,
    Success,
}

impl DonationStep {
    /// 1-based，用于进度指示
    pub fn index(&self) -> usize {
        match self {
            DonationStep::Amount => 1,
            DonationStep::Details => 2,
            DonationStep::Payment => 3,
            DonationStep::Success => 4,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DonationStep::Amount => "Choose an amount",
            DonationStep::Details => "Your details",
            DonationStep::Payment => "Payment",
            DonationStep::Success => "Thank you",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Waiting for the payment to complete")]
    AwaitingPayment,
    #[error("Not on the payment step (currently {0:?})")]
    NotAtPayment(DonationStep),
    #[error("This donation is already complete")]
    Completed,
    #[error("The payment was not completed")]
    PaymentIncomplete,
}

/// 金额选择：预设或自定义输入（保留原始字符串，前进时再校验）
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AmountSelection {
    #[default]
    Unset,
    Preset(Amount),
    Custom(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DonationDraft {
    pub selection: AmountSelection,
    pub frequency: DonationFrequency,
    pub donor: DonorDetails,
    pub campaign: Option<String>,
}

impl DonationDraft {
    pub fn amount(&self) -> Result<Amount, ValidationError> {
        match &self.selection {
            AmountSelection::Unset => Err(ValidationError::EmptyAmount),
            AmountSelection::Preset(amount) => Ok(*amount),
            AmountSelection::Custom(raw) => parse_amount(raw),
        }
    }

    /// 校验捐赠者信息，返回规范化后的副本
    pub fn validated_donor(&self) -> Result<DonorDetails, ValidationError> {
        let email = validate_email(&self.donor.email)?;
        let name = self.donor.name.trim().to_string();
        if name.is_empty() && !self.donor.anonymous {
            return Err(ValidationError::EmptyName);
        }
        let dedication = self
            .donor
            .dedication
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        Ok(DonorDetails {
            name,
            email,
            anonymous: self.donor.anonymous,
            dedication,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Info,
}

/// 短暂提示（toast）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }
}

/// 完成页回显的信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub amount: Amount,
    pub frequency: DonationFrequency,
    pub donor_name: Option<String>,
    pub email: String,
    pub session_id: Option<String>,
    /// 已完成结算但款项尚未到账（延迟到账的支付方式）
    pub processing: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DonationFlow {
    step: DonationStep,
    draft: DonationDraft,
    checkout: RequestTracker,
    /// 会话创建请求在途
    creating: bool,
    session: Option<CheckoutSession>,
    notice: Option<Notice>,
    receipt: Option<Receipt>,
}

impl DonationFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// 为某个活动开启的表单
    pub fn for_campaign(slug: impl Into<String>) -> Self {
        let mut flow = Self::new();
        flow.draft.campaign = Some(slug.into());
        flow
    }

    // --- Accessors ---

    pub fn step(&self) -> DonationStep {
        self.step
    }

    pub fn draft(&self) -> &DonationDraft {
        &self.draft
    }

    pub fn session(&self) -> Option<&CheckoutSession> {
        self.session.as_ref()
    }

    pub fn is_creating_session(&self) -> bool {
        self.creating
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn receipt(&self) -> Option<&Receipt> {
        self.receipt.as_ref()
    }

    /// 当前选择能否解析为有效金额（用于按钮禁用状态）
    pub fn current_amount(&self) -> Option<Amount> {
        self.draft.amount().ok()
    }

    /// 金额有效但低于支付处理方的最低扣款额，此时只能返回修改金额
    pub fn below_charge_minimum(&self) -> bool {
        self.current_amount()
            .is_some_and(|a| a.cents() < MIN_CHARGE_CENTS)
    }

    // --- 表单输入 ---

    pub fn select_preset(&mut self, amount: Amount) {
        self.draft.selection = AmountSelection::Preset(amount);
    }

    pub fn set_custom_amount(&mut self, raw: impl Into<String>) {
        self.draft.selection = AmountSelection::Custom(raw.into());
    }

    pub fn set_frequency(&mut self, frequency: DonationFrequency) {
        self.draft.frequency = frequency;
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.donor.name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.draft.donor.email = email.into();
    }

    pub fn set_anonymous(&mut self, anonymous: bool) {
        self.draft.donor.anonymous = anonymous;
    }

    pub fn set_dedication(&mut self, dedication: impl Into<String>) {
        let text: String = dedication.into();
        self.draft.donor.dedication = if text.is_empty() { None } else { Some(text) };
    }

    /// 用已登录用户的资料预填（不覆盖用户已经输入的内容）
    pub fn prefill_from(&mut self, user: &AuthUser) {
        if self.draft.donor.name.trim().is_empty() {
            if let Some(name) = user.display_name() {
                self.draft.donor.name = name.to_string();
            }
        }
        if self.draft.donor.email.trim().is_empty() {
            if let Some(email) = &user.email {
                self.draft.donor.email = email.clone();
            }
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    // --- 步骤导航 ---

    /// 校验当前步骤并前进一步
    pub fn advance(&mut self) -> Result<DonationStep, StepError> {
        match self.step {
            DonationStep::Amount => {
                self.draft.amount()?;
                self.step = DonationStep::Details;
            }
            DonationStep::Details => {
                self.draft.donor = self.draft.validated_donor()?;
                self.notice = None;
                self.step = DonationStep::Payment;
            }
            DonationStep::Payment => return Err(StepError::AwaitingPayment),
            DonationStep::Success => return Err(StepError::Completed),
        }
        Ok(self.step)
    }

    /// 返回上一步；离开支付步骤时丢弃会话与在途请求
    pub fn back(&mut self) -> DonationStep {
        match self.step {
            DonationStep::Details => self.step = DonationStep::Amount,
            DonationStep::Payment => {
                self.checkout.invalidate();
                self.creating = false;
                self.session = None;
                self.notice = None;
                self.step = DonationStep::Details;
            }
            DonationStep::Amount | DonationStep::Success => {}
        }
        self.step
    }

    /// 重新开始（保留活动归属）
    pub fn reset(&mut self) {
        let campaign = self.draft.campaign.take();
        self.checkout.invalidate();
        *self = Self {
            checkout: std::mem::take(&mut self.checkout),
            ..Self::default()
        };
        self.draft.campaign = campaign;
    }

    // --- 支付 ---

    /// 准备一次会话创建请求
    pub fn begin_checkout(&mut self) -> Result<(Ticket, CreateCheckoutSessionRequest), StepError> {
        if self.step != DonationStep::Payment {
            return Err(StepError::NotAtPayment(self.step));
        }
        let request = CreateCheckoutSessionRequest {
            amount: self.draft.amount()?,
            frequency: self.draft.frequency,
            donor: self.draft.validated_donor()?,
            campaign: self.draft.campaign.clone(),
        };
        self.session = None;
        self.creating = true;
        Ok((self.checkout.issue(), request))
    }

    /// 会话创建成功；票据过期或已离开支付步骤时返回 false
    pub fn attach_session(&mut self, ticket: Ticket, session: CheckoutSession) -> bool {
        if self.step != DonationStep::Payment || !self.checkout.is_current(ticket) {
            return false;
        }
        self.creating = false;
        self.session = Some(session);
        self.notice = None;
        true
    }

    /// 会话创建失败
    pub fn checkout_failed(&mut self, ticket: Ticket, message: impl Into<String>) -> bool {
        if self.step != DonationStep::Payment || !self.checkout.is_current(ticket) {
            return false;
        }
        self.creating = false;
        self.session = None;
        self.notice = Some(Notice::error(message));
        true
    }

    /// 支付组件报告成功
    pub fn payment_succeeded(&mut self) -> Result<&Receipt, StepError> {
        self.complete(false)
    }

    /// 按会话状态确认结果
    ///
    /// 会话完成即成功，延迟到账的款项在回执上标记为处理中；
    /// 未完成的会话不改变状态，由调用方决定提示与重试。
    pub fn confirm_payment(&mut self, status: &SessionStatus) -> Result<&Receipt, StepError> {
        if !status.is_successful() {
            return Err(StepError::PaymentIncomplete);
        }
        self.complete(status.is_processing())
    }

    fn complete(&mut self, processing: bool) -> Result<&Receipt, StepError> {
        match self.step {
            DonationStep::Payment => {}
            DonationStep::Success => return Err(StepError::Completed),
            other => return Err(StepError::NotAtPayment(other)),
        }

        let donor = &self.draft.donor;
        let receipt = Receipt {
            amount: self.draft.amount()?,
            frequency: self.draft.frequency,
            donor_name: donor.public_name().map(str::to_string),
            email: donor.email.clone(),
            session_id: self.session.as_ref().map(|s| s.id.clone()),
            processing,
        };

        self.checkout.invalidate();
        self.creating = false;
        self.notice = None;
        self.step = DonationStep::Success;
        Ok(&*self.receipt.insert(receipt))
    }

    /// 支付组件报告失败：提示并停留在支付步骤，丢弃会话以便重试
    pub fn payment_failed(&mut self, message: impl Into<String>) -> bool {
        if self.step != DonationStep::Payment {
            return false;
        }
        self.checkout.invalidate();
        self.creating = false;
        self.session = None;
        self.notice = Some(Notice::error(message));
        true
    }

    /// 创建会话的完整流程（持有 `&mut self` 期间 await，适合非共享状态）
    pub async fn start_checkout<P: PaymentSessionProvider>(
        &mut self,
        provider: &P,
    ) -> Result<(), StepError> {
        let (ticket, request) = self.begin_checkout()?;
        match provider.create_session(&request).await {
            Ok(session) => {
                self.attach_session(ticket, session);
            }
            Err(e) => {
                self.checkout_failed(ticket, format!("Could not start checkout: {}", e));
            }
        }
        Ok(())
    }
}

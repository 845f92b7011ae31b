//! Admin review dashboard: three status buckets that open and close
//! independently, plus a single selected bill shown in the detail panel.

use billed_api::endpoints::{bills::Bill, BillId, BillStatus};

use super::bills::{self, Card, ReviewerExclusion};
use super::{InputMode, LoadingState};

/// Navbar height (in viewport percent) with the detail panel collapsed
pub const NAVBAR_HEIGHT_COLLAPSED: u16 = 120;

/// Navbar height (in viewport percent) with a bill open for review
pub const NAVBAR_HEIGHT_EXPANDED: u16 = 150;

// Detail form controls
pub const ICON_EYE_HOOK: &str = "icon-eye-d";
pub const COMMENT_HOOK: &str = "commentary2";
pub const ACCEPT_BUTTON_HOOK: &str = "btn-accept-bill";
pub const REFUSE_BUTTON_HOOK: &str = "btn-refuse-bill";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BucketId {
    Pending,
    Accepted,
    Refused,
}

impl BucketId {
    pub const ALL: [BucketId; 3] = [Self::Pending, Self::Accepted, Self::Refused];

    pub fn index(&self) -> u8 {
        match self {
            Self::Pending => 1,
            Self::Accepted => 2,
            Self::Refused => 3,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(Self::Pending),
            2 => Some(Self::Accepted),
            3 => Some(Self::Refused),
            _ => None,
        }
    }

    pub fn status(&self) -> BillStatus {
        match self {
            Self::Pending => BillStatus::Pending,
            Self::Accepted => BillStatus::Accepted,
            Self::Refused => BillStatus::Refused,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Pending => "En attente",
            Self::Accepted => "Validé",
            Self::Refused => "Refusé",
        }
    }

    pub fn arrow_hook(&self) -> String {
        format!("arrow-icon{}", self.index())
    }

    pub fn container_hook(&self) -> String {
        format!("status-bills-container{}", self.index())
    }

    fn slot(&self) -> usize {
        self.index() as usize - 1
    }
}

/// One status bucket and the cards currently rendered in it
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub id: BucketId,
    is_open: bool,
    cards: Vec<Card>,
}

impl Bucket {
    fn closed(id: BucketId) -> Self {
        Self {
            id,
            is_open: false,
            cards: Vec::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    #[default]
    NoSelection,
    Selected(BillId),
}

impl Selection {
    pub fn bill_id(&self) -> Option<&BillId> {
        match self {
            Self::Selected(id) => Some(id),
            Self::NoSelection => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BucketToggle {
    Opened { cards: usize },
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailTransition {
    Opened(BillId),
    Closed(BillId),
    /// No rendered card carries this id
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardHighlight {
    Selected,
    Unselected,
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    pub bills: Vec<Bill>,
    pub bills_loading: LoadingState,
    pub input_mode: InputMode,
    /// Admin comment typed in the detail form (`commentary2`)
    pub comment: String,
    /// Bill whose accept/refuse update has not settled yet
    pub review_in_flight: Option<BillId>,
    /// Index into `visible_cards()` of the keyboard cursor
    pub cursor: usize,
    buckets: [Bucket; 3],
    selection: Selection,
    exclusion: ReviewerExclusion,
}

impl DashboardState {
    pub fn new(exclusion: ReviewerExclusion) -> Self {
        Self {
            bills: Vec::new(),
            bills_loading: LoadingState::default(),
            input_mode: InputMode::default(),
            comment: String::new(),
            review_in_flight: None,
            cursor: 0,
            buckets: BucketId::ALL.map(Bucket::closed),
            selection: Selection::default(),
            exclusion,
        }
    }

    pub fn bucket(&self, id: BucketId) -> &Bucket {
        &self.buckets[id.slot()]
    }

    pub fn buckets(&self) -> &[Bucket; 3] {
        &self.buckets
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_bill(&self) -> Option<&Bill> {
        let id = self.selection.bill_id()?;
        self.bill(id)
    }

    pub fn bill(&self, id: &BillId) -> Option<&Bill> {
        self.bills.iter().find(|bill| &bill.id == id)
    }

    /// Bills eligible for a bucket, whether it is open or not
    pub fn bills_for(&self, id: BucketId) -> Vec<&Bill> {
        bills::filtered_bills(&self.bills, id.status(), &self.exclusion)
    }

    /// Replace the bill set, re-rendering any bucket that is open
    pub fn set_bills(&mut self, bills: Vec<Bill>) {
        self.bills = bills;
        for id in BucketId::ALL {
            if self.bucket(id).is_open {
                let cards = bills::cards(&self.bills_for(id));
                self.buckets[id.slot()].cards = cards;
            }
        }
        self.clamp_cursor();
    }

    pub fn toggle_bucket(&mut self, id: BucketId) -> BucketToggle {
        let transition = if self.bucket(id).is_open {
            let bucket = &mut self.buckets[id.slot()];
            bucket.cards.clear();
            bucket.is_open = false;
            BucketToggle::Closed
        } else {
            let cards = bills::cards(&self.bills_for(id));
            let count = cards.len();
            let bucket = &mut self.buckets[id.slot()];
            bucket.cards = cards;
            bucket.is_open = true;
            BucketToggle::Opened { cards: count }
        };

        tracing::debug!("Bucket {} toggled: {:?}", id.index(), transition);
        self.clamp_cursor();
        transition
    }

    /// Open the clicked card in the detail panel, or close it if it is the
    /// one already open. Only rendered cards respond.
    pub fn open_or_close_detail(&mut self, bill_id: &BillId) -> DetailTransition {
        if !self.is_rendered(bill_id) {
            tracing::debug!("Ignoring click on bill {} with no rendered card", bill_id);
            return DetailTransition::Ignored;
        }

        if self.selection.bill_id() == Some(bill_id) {
            self.selection = Selection::NoSelection;
            self.input_mode = InputMode::Normal;
            DetailTransition::Closed(bill_id.clone())
        } else {
            self.selection = Selection::Selected(bill_id.clone());
            self.comment.clear();
            self.input_mode = InputMode::Normal;
            DetailTransition::Opened(bill_id.clone())
        }
    }

    pub fn card_highlight(&self, bill_id: &BillId) -> CardHighlight {
        if self.selection.bill_id() == Some(bill_id) {
            CardHighlight::Selected
        } else {
            CardHighlight::Unselected
        }
    }

    pub fn navbar_height(&self) -> u16 {
        match self.selection {
            Selection::NoSelection => NAVBAR_HEIGHT_COLLAPSED,
            Selection::Selected(_) => NAVBAR_HEIGHT_EXPANDED,
        }
    }

    /// Whether accept/refuse controls are enabled for the open bill
    pub fn can_review(&self) -> bool {
        self.review_in_flight.is_none()
            && self.selected_bill().is_some_and(|bill| bill.is_pending())
    }

    /// Cards of all open buckets, top to bottom
    pub fn visible_cards(&self) -> Vec<&Card> {
        self.buckets
            .iter()
            .filter(|bucket| bucket.is_open)
            .flat_map(|bucket| bucket.cards.iter())
            .collect()
    }

    pub fn focused_card(&self) -> Option<&Card> {
        self.visible_cards().get(self.cursor).copied()
    }

    pub fn select_next(&mut self) {
        let len = self.visible_cards().len();
        if len > 0 {
            self.cursor = (self.cursor + 1) % len;
        }
    }

    pub fn select_prev(&mut self) {
        let len = self.visible_cards().len();
        if len > 0 {
            self.cursor = if self.cursor == 0 { len - 1 } else { self.cursor - 1 };
        }
    }

    pub fn view(&self) -> DashboardView {
        let focused = self.focused_card().map(|card| card.bill_id.clone());
        let buckets = self
            .buckets
            .iter()
            .map(|bucket| BucketView {
                id: bucket.id,
                title: bucket.id.title(),
                count: self.bills_for(bucket.id).len(),
                arrow_rotation: if bucket.is_open { 0 } else { 90 },
                cards: bucket
                    .cards
                    .iter()
                    .map(|card| CardView {
                        card: card.clone(),
                        highlight: self.card_highlight(&card.bill_id),
                        focused: focused.as_ref() == Some(&card.bill_id),
                    })
                    .collect(),
            })
            .collect();

        let right_panel = match self.selected_bill() {
            Some(bill) => RightPanel::Detail(DetailView {
                bill: bill.clone(),
                comment: self.comment.clone(),
                editing_comment: self.input_mode == InputMode::Comment,
                can_review: self.can_review(),
            }),
            None => RightPanel::Placeholder,
        };

        DashboardView {
            buckets,
            right_panel,
            navbar_height: self.navbar_height(),
        }
    }

    fn is_rendered(&self, bill_id: &BillId) -> bool {
        self.visible_cards()
            .iter()
            .any(|card| &card.bill_id == bill_id)
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible_cards().len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }
}

/// What the dashboard shows, derived from `DashboardState` and drawn by the
/// dashboard screen.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub buckets: Vec<BucketView>,
    pub right_panel: RightPanel,
    pub navbar_height: u16,
}

impl DashboardView {
    pub fn bucket(&self, id: BucketId) -> &BucketView {
        &self.buckets[id.slot()]
    }

    pub fn selected_cards(&self) -> Vec<&CardView> {
        self.buckets
            .iter()
            .flat_map(|bucket| bucket.cards.iter())
            .filter(|card| card.highlight == CardHighlight::Selected)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BucketView {
    pub id: BucketId,
    pub title: &'static str,
    pub count: usize,
    /// Arrow icon rotation in degrees: 0 when open, 90 when closed
    pub arrow_rotation: u16,
    pub cards: Vec<CardView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub card: Card,
    pub highlight: CardHighlight,
    pub focused: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RightPanel {
    /// Big billed icon shown when no bill is open
    Placeholder,
    Detail(DetailView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub bill: Bill,
    pub comment: String,
    pub editing_comment: bool,
    /// Accept/refuse buttons are shown and enabled
    pub can_review: bool,
}

impl DetailView {
    /// Hooks of the controls the detail form currently offers
    pub fn controls(&self) -> Vec<&'static str> {
        let mut controls = vec![ICON_EYE_HOOK];
        if self.bill.is_pending() {
            controls.push(COMMENT_HOOK);
        }
        if self.can_review {
            controls.extend([ACCEPT_BUTTON_HOOK, REFUSE_BUTTON_HOOK]);
        }
        controls
    }
}

use billed_api::endpoints::bills::NewReceipt;

/// Expense categories offered by the `expense-type` select
pub const EXPENSE_TYPES: [&str; 7] = [
    "Transports",
    "Restaurants et bars",
    "Hôtel et logement",
    "Services en ligne",
    "IT et électronique",
    "Equipement et matériel",
    "Fournitures de bureau",
];

/// Form field of `form-new-bill`, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewBillField {
    #[default]
    ExpenseType,
    ExpenseName,
    Date,
    Amount,
    Vat,
    Pct,
    Commentary,
    File,
    Submit,
}

impl NewBillField {
    pub const ORDER: [NewBillField; 9] = [
        Self::ExpenseType,
        Self::ExpenseName,
        Self::Date,
        Self::Amount,
        Self::Vat,
        Self::Pct,
        Self::Commentary,
        Self::File,
        Self::Submit,
    ];

    pub fn next(&self) -> Self {
        let index = self.position();
        Self::ORDER[(index + 1) % Self::ORDER.len()]
    }

    pub fn prev(&self) -> Self {
        let index = self.position();
        Self::ORDER[(index + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ExpenseType => "Type de dépense",
            Self::ExpenseName => "Nom de la dépense",
            Self::Date => "Date",
            Self::Amount => "Montant TTC",
            Self::Vat => "TVA",
            Self::Pct => "%",
            Self::Commentary => "Commentaire",
            Self::File => "Justificatif",
            Self::Submit => "Envoyer",
        }
    }

    /// Stable hook of the matching form element
    pub fn hook(&self) -> &'static str {
        match self {
            Self::ExpenseType => "expense-type",
            Self::ExpenseName => "expense-name",
            Self::Date => "datepicker",
            Self::Amount => "amount",
            Self::Vat => "vat",
            Self::Pct => "pct",
            Self::Commentary => "commentary",
            Self::File => "file",
            Self::Submit => "form-new-bill",
        }
    }

    fn position(&self) -> usize {
        Self::ORDER
            .iter()
            .position(|field| field == self)
            .unwrap_or_default()
    }
}

/// State of the New Bill form
#[derive(Debug, Clone)]
pub struct NewBillState {
    pub current_field: NewBillField,
    pub expense_type: String,
    pub expense_name: String,
    pub date: String, // YYYY-MM-DD
    pub amount: String,
    pub vat: String,
    pub pct: String,
    pub commentary: String,

    /// Path typed into the file input
    pub file_input: String,
    /// Receipt accepted by the last file change, uploaded on submit
    pub receipt: Option<NewReceipt>,

    /// Text of the `error-message` element
    pub error_message: Option<String>,
    pub submitting: bool,
}

impl Default for NewBillState {
    fn default() -> Self {
        Self {
            current_field: NewBillField::default(),
            expense_type: EXPENSE_TYPES[0].to_string(),
            expense_name: String::new(),
            date: String::new(),
            amount: String::new(),
            vat: String::new(),
            pct: String::new(),
            commentary: String::new(),
            file_input: String::new(),
            receipt: None,
            error_message: None,
            submitting: false,
        }
    }
}

impl NewBillState {
    /// Editable text behind the focused field, if it takes typed input
    pub fn focused_input_mut(&mut self) -> Option<&mut String> {
        match self.current_field {
            NewBillField::ExpenseName => Some(&mut self.expense_name),
            NewBillField::Date => Some(&mut self.date),
            NewBillField::Amount => Some(&mut self.amount),
            NewBillField::Vat => Some(&mut self.vat),
            NewBillField::Pct => Some(&mut self.pct),
            NewBillField::Commentary => Some(&mut self.commentary),
            NewBillField::File => Some(&mut self.file_input),
            NewBillField::ExpenseType | NewBillField::Submit => None,
        }
    }

    pub fn value_of(&self, field: NewBillField) -> &str {
        match field {
            NewBillField::ExpenseType => &self.expense_type,
            NewBillField::ExpenseName => &self.expense_name,
            NewBillField::Date => &self.date,
            NewBillField::Amount => &self.amount,
            NewBillField::Vat => &self.vat,
            NewBillField::Pct => &self.pct,
            NewBillField::Commentary => &self.commentary,
            NewBillField::File => &self.file_input,
            NewBillField::Submit => "",
        }
    }

    pub fn cycle_expense_type(&mut self, forward: bool) {
        let len = EXPENSE_TYPES.len();
        let index = EXPENSE_TYPES
            .iter()
            .position(|t| *t == self.expense_type)
            .unwrap_or_default();
        let next = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        self.expense_type = EXPENSE_TYPES[next].to_string();
    }

    /// Type a character into the focused field. Editing the file path drops
    /// the staged receipt until the new path is loaded.
    pub fn push_char(&mut self, c: char) {
        self.edit_focused(|input| input.push(c));
    }

    pub fn pop_char(&mut self) {
        self.edit_focused(|input| {
            input.pop();
        });
    }

    fn edit_focused(&mut self, edit: impl FnOnce(&mut String)) {
        let editing_file = self.current_field == NewBillField::File;
        if let Some(input) = self.focused_input_mut() {
            edit(input);
            if editing_file {
                self.receipt = None;
            }
        }
    }

    /// Forget the staged receipt and empty the file input
    pub fn reset_file(&mut self) {
        self.file_input.clear();
        self.receipt = None;
    }
}

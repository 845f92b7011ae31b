use std::fmt::Display;
use std::str::FromStr;

use crate::session::UserType;

/// Application routes, addressed by the same hash paths as the web client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Bills,
    NewBill,
    Dashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::Bills => "#employee/bills",
            Self::NewBill => "#employee/bill/new",
            Self::Dashboard => "#admin/dashboard",
        }
    }

    /// Landing route after sign-in
    pub fn home_for(user_type: UserType) -> Self {
        match user_type {
            UserType::Admin => Self::Dashboard,
            UserType::Employee => Self::Bills,
        }
    }

    pub fn is_allowed_for(&self, user_type: UserType) -> bool {
        match self {
            Self::Login => true,
            Self::Bills | Self::NewBill => user_type == UserType::Employee,
            Self::Dashboard => user_type == UserType::Admin,
        }
    }

    /// Whether the view registered for this route shows the bill list
    pub fn needs_bills(&self) -> bool {
        matches!(self, Self::Bills | Self::Dashboard)
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "/" | "" => Ok(Self::Login),
            "#employee/bills" => Ok(Self::Bills),
            "#employee/bill/new" => Ok(Self::NewBill),
            "#admin/dashboard" => Ok(Self::Dashboard),
            other => Err(format!("unknown route: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_parse_back_to_routes() {
        for route in [Route::Login, Route::Bills, Route::NewBill, Route::Dashboard] {
            assert_eq!(route.path().parse::<Route>(), Ok(route));
        }
        assert!("#admin/users".parse::<Route>().is_err());
    }

    #[test]
    fn home_depends_on_role() {
        assert_eq!(Route::home_for(UserType::Admin), Route::Dashboard);
        assert_eq!(Route::home_for(UserType::Employee), Route::Bills);
    }

    #[test]
    fn employees_cannot_open_dashboard() {
        assert!(!Route::Dashboard.is_allowed_for(UserType::Employee));
        assert!(Route::NewBill.is_allowed_for(UserType::Employee));
        assert!(!Route::NewBill.is_allowed_for(UserType::Admin));
    }
}

//! Route table of the console.

use std::sync::Arc;

use rat_passage::{BoxedView, RouteMatch, RouteTable, ViewError};

use crate::model::Directory;
use crate::pages::{AdminDetailsPage, DashboardPage, HistoryLogPage, NotFoundPage};

/// An `{id}` that is not a number cannot be rendered at all. A numeric id
/// with no admin behind it is a not-found page.
fn admin_id(m: &RouteMatch) -> Result<u32, ViewError> {
    let raw = m.param("id").unwrap_or_default();
    raw.parse()
        .map_err(|_| ViewError::new(format!("'{raw}' is not an admin id")))
}

fn unknown_admin(m: &RouteMatch, id: u32) -> BoxedView {
    Box::new(NotFoundPage::new(m.location().clone()).with_reason(format!("No admin with id {id}")))
}

pub fn build_table(directory: Arc<Directory>) -> rat_passage::Result<RouteTable<BoxedView>> {
    let dashboard = Arc::clone(&directory);
    let details = Arc::clone(&directory);
    let history = directory;

    RouteTable::builder()
        .route("/", move |_| Ok(Box::new(DashboardPage::new(Arc::clone(&dashboard))) as BoxedView))
        .route("/admins/{id}", move |m| {
            let id = admin_id(m)?;
            Ok(match details.admin(id) {
                Some(admin) => Box::new(AdminDetailsPage::new(admin.clone())) as BoxedView,
                None => unknown_admin(m, id),
            })
        })
        .route("/admins/{id}/history", move |m| {
            let id = admin_id(m)?;
            Ok(match history.admin(id) {
                Some(_) => Box::new(HistoryLogPage::new(id, history.history(id))) as BoxedView,
                None => unknown_admin(m, id),
            })
        })
        .fallback(|m| Ok(Box::new(NotFoundPage::new(m.location().clone())) as BoxedView))
        .build()
}

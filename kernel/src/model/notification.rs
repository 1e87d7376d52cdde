use crate::model::contact::Contact;
use crate::model::reservation::{Reservation, ReservationStatus};

pub const DEFAULT_CANCELLED_NOTE: &str =
    "Unfortunately, we cannot accommodate your reservation request.";
pub const DEFAULT_MODIFIED_NOTE: &str = "Your reservation has been modified.";

/// A rendered outbound email, ready to be queued for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Restaurant identity used in email copy. `email` is the staff address that
/// receives alert notifications.
#[derive(Debug, Clone)]
pub struct RestaurantInfo {
    pub name: String,
    pub email: String,
}

/// Every email the system sends. Staff alerts go to the restaurant address,
/// the rest to the customer who made the request.
#[derive(Debug)]
pub enum Notification {
    ReservationAlert(Reservation),
    ReservationConfirmed(Reservation),
    ReservationStatusUpdate { reservation: Reservation, note: String },
    ContactAlert(Contact),
    ContactAcknowledgement(Contact),
}

impl Notification {
    /// Picks the customer notification for an admin-driven status change, or
    /// `None` when the new status warrants no email. A reservation put back
    /// to `pending` is still awaiting review, so the customer hears nothing.
    pub fn for_reservation_transition(
        reservation: &Reservation,
        admin_notes: Option<&str>,
    ) -> Option<Self> {
        match reservation.status {
            ReservationStatus::Pending => None,
            ReservationStatus::Confirmed => {
                Some(Self::ReservationConfirmed(reservation.clone()))
            }
            ReservationStatus::Cancelled => Some(Self::ReservationStatusUpdate {
                reservation: reservation.clone(),
                note: admin_notes.unwrap_or(DEFAULT_CANCELLED_NOTE).to_string(),
            }),
            ReservationStatus::Modified => Some(Self::ReservationStatusUpdate {
                reservation: reservation.clone(),
                note: admin_notes.unwrap_or(DEFAULT_MODIFIED_NOTE).to_string(),
            }),
        }
    }

    pub fn render(&self, restaurant: &RestaurantInfo) -> EmailMessage {
        match self {
            Self::ReservationAlert(r) => EmailMessage {
                to: restaurant.email.clone(),
                subject: format!("New Reservation Alert - {}", r.name),
                body: format!(
                    "A new reservation request is awaiting review.\n\n\
                     Name: {}\nEmail: {}\nPhone: {}\nDate: {}\nTime: {}\nGuests: {}\n\
                     Special requests: {}\n\n\
                     Confirmation number: {}",
                    r.name,
                    r.email,
                    r.phone,
                    r.date,
                    r.time,
                    r.guests,
                    r.special_requests.as_deref().unwrap_or("none"),
                    r.id,
                ),
            },
            Self::ReservationConfirmed(r) => EmailMessage {
                to: r.email.clone(),
                subject: format!("Reservation Confirmed - {}", restaurant.name),
                body: format!(
                    "Dear {},\n\n\
                     Your reservation at {} has been confirmed.\n\n\
                     Date: {}\nTime: {}\nGuests: {}\nConfirmation number: {}\n\n\
                     Thank you for choosing {}! We look forward to serving you.",
                    r.name, restaurant.name, r.date, r.time, r.guests, r.id, restaurant.name,
                ),
            },
            Self::ReservationStatusUpdate { reservation: r, note } => EmailMessage {
                to: r.email.clone(),
                subject: format!(
                    "Reservation {} - {}",
                    capitalized(r.status.as_ref()),
                    restaurant.name
                ),
                body: format!(
                    "Dear {},\n\n\
                     There is an update to your reservation on {} at {}.\n\n\
                     {}\n\n\
                     If you have any questions, please contact us at {}.",
                    r.name, r.date, r.time, note, restaurant.email,
                ),
            },
            Self::ContactAlert(c) => EmailMessage {
                to: restaurant.email.clone(),
                subject: format!("New Contact Form Submission - {}", c.subject),
                body: format!(
                    "A new {} ({} priority) message arrived.\n\n\
                     Name: {}\nEmail: {}\nPhone: {}\nSubject: {}\n\n{}",
                    c.reason,
                    c.priority,
                    c.name,
                    c.email,
                    c.phone.as_deref().unwrap_or("not provided"),
                    c.subject,
                    c.message,
                ),
            },
            Self::ContactAcknowledgement(c) => EmailMessage {
                to: c.email.clone(),
                subject: format!(
                    "Thank you for contacting {} - We'll be in touch soon!",
                    restaurant.name
                ),
                body: format!(
                    "Dear {},\n\n\
                     We received your message about \"{}\" and will get back to you \
                     within 24 hours.\n\n\
                     The {} team",
                    c.name, c.subject, restaurant.name,
                ),
            },
        }
    }
}

fn capitalized(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::id::ReservationId;
    use chrono::{NaiveDate, Utc};

    fn reservation(status: ReservationStatus) -> Reservation {
        Reservation {
            id: ReservationId::new(),
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            phone: "555-000-1111".into(),
            date: NaiveDate::from_ymd_opt(2030, 6, 1).unwrap(),
            time: "19:00".into(),
            guests: 2,
            special_requests: None,
            status,
            admin_notes: None,
            responded_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn restaurant() -> RestaurantInfo {
        RestaurantInfo {
            name: "Trattoria".into(),
            email: "staff@trattoria.test".into(),
        }
    }

    #[test]
    fn confirmed_transition_notifies_the_customer() {
        let r = reservation(ReservationStatus::Confirmed);
        let n = Notification::for_reservation_transition(&r, None).unwrap();
        let email = n.render(&restaurant());
        assert_eq!(email.to, "ada@example.com");
        assert!(email.subject.contains("Confirmed"));
    }

    #[test]
    fn pending_transition_sends_nothing() {
        let r = reservation(ReservationStatus::Pending);
        assert!(Notification::for_reservation_transition(&r, None).is_none());
    }

    #[test]
    fn cancelled_transition_uses_admin_notes_over_default() {
        let r = reservation(ReservationStatus::Cancelled);

        let n = Notification::for_reservation_transition(&r, None).unwrap();
        assert!(n.render(&restaurant()).body.contains(DEFAULT_CANCELLED_NOTE));

        let n = Notification::for_reservation_transition(&r, Some("Kitchen closed that day"))
            .unwrap();
        let body = n.render(&restaurant()).body;
        assert!(body.contains("Kitchen closed that day"));
        assert!(!body.contains(DEFAULT_CANCELLED_NOTE));
    }

    #[test]
    fn modified_transition_falls_back_to_default_note() {
        let r = reservation(ReservationStatus::Modified);
        let n = Notification::for_reservation_transition(&r, None).unwrap();
        assert!(n.render(&restaurant()).body.contains(DEFAULT_MODIFIED_NOTE));
    }

    #[test]
    fn alert_goes_to_staff_address() {
        let r = reservation(ReservationStatus::Pending);
        let email = Notification::ReservationAlert(r).render(&restaurant());
        assert_eq!(email.to, "staff@trattoria.test");
        assert!(email.body.contains("19:00"));
    }
}

use chrono::NaiveDate;

use sereno_core::models::BookingDetail;

pub fn subject(detail: &BookingDetail) -> String {
    format!("Booking Confirmation - {}", detail.reference)
}

/// Renders the confirmation email body. Self-contained HTML with inline
/// styles so it survives the usual webmail sanitizers.
pub fn render(detail: &BookingDetail) -> String {
    let formatted_date = display_date(&detail.date);

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Booking Confirmation</title>
    <style>
        body {{
            font-family: Arial, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 600px;
            margin: 0 auto;
            padding: 20px;
            background-color: #f4f4f4;
        }}
        .container {{
            background: white;
            padding: 30px;
            border-radius: 10px;
            box-shadow: 0 0 10px rgba(0,0,0,0.1);
        }}
        .header {{
            text-align: center;
            border-bottom: 2px solid #4CAF50;
            padding-bottom: 20px;
            margin-bottom: 30px;
        }}
        .header h1 {{
            color: #4CAF50;
            margin: 0;
        }}
        .booking-details {{
            background: #f8f9fa;
            padding: 20px;
            border-radius: 8px;
            margin: 20px 0;
        }}
        .detail-row {{
            display: flex;
            justify-content: space-between;
            margin-bottom: 10px;
            padding: 5px 0;
            border-bottom: 1px solid #eee;
        }}
        .detail-label {{
            font-weight: bold;
            color: #555;
        }}
        .detail-value {{
            color: #333;
        }}
        .reference {{
            background: #e3f2fd;
            padding: 15px;
            border-radius: 8px;
            text-align: center;
            margin: 20px 0;
            border-left: 4px solid #2196f3;
        }}
        .reference-number {{
            font-size: 18px;
            font-weight: bold;
            color: #1976d2;
        }}
        .footer {{
            text-align: center;
            margin-top: 30px;
            padding-top: 20px;
            border-top: 1px solid #eee;
            color: #666;
        }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Booking Confirmation</h1>
            <p>Your massage appointment has been confirmed!</p>
        </div>

        <div class="reference">
            <p>Booking Reference Number:</p>
            <div class="reference-number">{reference}</div>
        </div>

        <div class="booking-details">
            <h3>Appointment Details</h3>
            <div class="detail-row">
                <span class="detail-label">Service:</span>
                <span class="detail-value">{service_name}</span>
            </div>
            <div class="detail-row">
                <span class="detail-label">Duration:</span>
                <span class="detail-value">{duration} minutes</span>
            </div>
            <div class="detail-row">
                <span class="detail-label">Price:</span>
                <span class="detail-value">€{price:.2}</span>
            </div>
            <div class="detail-row">
                <span class="detail-label">Date:</span>
                <span class="detail-value">{formatted_date}</span>
            </div>
            <div class="detail-row">
                <span class="detail-label">Time:</span>
                <span class="detail-value">{time_slot}</span>
            </div>
        </div>

        <div class="booking-details">
            <h3>Customer Information</h3>
            <div class="detail-row">
                <span class="detail-label">Name:</span>
                <span class="detail-value">{client_name}</span>
            </div>
            <div class="detail-row">
                <span class="detail-label">Email:</span>
                <span class="detail-value">{email}</span>
            </div>
            <div class="detail-row">
                <span class="detail-label">Phone:</span>
                <span class="detail-value">{phone}</span>
            </div>
        </div>

        <div class="footer">
            <p>We look forward to seeing you!</p>
            <p><strong>Massage Booking Team</strong></p>
            <p style="font-size: 12px; color: #999;">
                Please save this email for your records. If you need to make any changes,
                please contact us with your booking reference number.
            </p>
        </div>
    </div>
</body>
</html>"#,
        reference = detail.reference,
        service_name = detail.service_name,
        duration = detail.duration,
        price = detail.price,
        formatted_date = formatted_date,
        time_slot = detail.time_slot,
        client_name = detail.client_name,
        email = detail.email,
        phone = detail.phone,
    )
}

/// "2025-06-01" becomes "Sunday, June 1, 2025"; unparseable input passes
/// through untouched.
fn display_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) => parsed.format("%A, %B %-d, %Y").to_string(),
        Err(_) => date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample() -> BookingDetail {
        BookingDetail {
            id: 1,
            reference: "BK-20250601-001".to_string(),
            client_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "+33612345678".to_string(),
            service_id: 1,
            date: "2025-06-01".to_string(),
            time_slot: "09:00".to_string(),
            created_at: Utc::now(),
            service_name: "Swedish Massage".to_string(),
            duration: 60,
            price: 50.0,
        }
    }

    #[test]
    fn subject_carries_the_reference() {
        assert_eq!(subject(&sample()), "Booking Confirmation - BK-20250601-001");
    }

    #[test]
    fn body_contains_every_booking_field() {
        let body = render(&sample());
        assert!(body.contains("BK-20250601-001"));
        assert!(body.contains("Swedish Massage"));
        assert!(body.contains("60 minutes"));
        assert!(body.contains("€50.00"));
        assert!(body.contains("Sunday, June 1, 2025"));
        assert!(body.contains("09:00"));
        assert!(body.contains("Jane Doe"));
        assert!(body.contains("jane@example.com"));
    }

    #[test]
    fn unparseable_date_is_shown_verbatim() {
        let mut detail = sample();
        detail.date = "whenever".to_string();
        assert!(render(&detail).contains("whenever"));
    }
}

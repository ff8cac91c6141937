use lsbs::slots::{Channel, FrameGeometry, ImageSlots, PixelLayout, VideoSlots};
use lsbs::{BitDepth, Carrier, Conceal, Error, Framing, Package, Result, Reveal, Slots};

/// Spreads `bytes` over one slot per bit, most significant bit first.
fn bit_slots(bytes: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .flat_map(|byte| (0..8).rev().map(move |shift| (byte >> shift) & 1))
        .collect()
}

fn noisy(len: usize) -> Vec<u8> {
    (0..len).map(|i| ((i * 7919) % 251) as u8).collect()
}

#[test]
fn it_hides_text_in_a_black_image() -> Result<()> {
    let mut pixels = vec![0u8; 8 * 8 * 3];
    let depth = BitDepth::ONE;

    let mut cover = ImageSlots::new(pixels.as_mut_slice(), 8, 8, PixelLayout::Rgb)?;
    assert_eq!(Carrier::text(depth).conceal(b"Hi", &mut cover)?, 24);

    assert_eq!(pixels[..24], bit_slots(b"Hi\0"));
    assert!(pixels[24..].iter().all(|&channel| channel == 0));

    let cover = ImageSlots::new(pixels.as_slice(), 8, 8, PixelLayout::Rgb)?;
    let extraction = Package::text(depth).extract(&cover)?;

    assert_eq!(extraction.payload, b"Hi");
    assert!(extraction.complete);
    assert_eq!(extraction.slots_read, 24);

    Ok(())
}

#[test]
fn it_rejects_a_payload_larger_than_the_cover() -> Result<()> {
    let mut pixels = vec![0u8; 8 * 8 * 3];
    let mut cover = ImageSlots::new(pixels.as_mut_slice(), 8, 8, PixelLayout::Rgb)?;

    let result = Carrier::text(BitDepth::ONE).conceal(&[b'x'; 30], &mut cover);

    assert!(matches!(
        result,
        Err(Error::PayloadTooLarge {
            needed: 248,
            capacity: 192
        })
    ));
    assert!(pixels.iter().all(|&channel| channel == 0));

    Ok(())
}

#[test]
fn it_fills_the_cover_exactly() -> Result<()> {
    let depth = BitDepth::new(3)?;
    let carrier = Carrier::text(depth);
    let mut cover = noisy(100);

    assert_eq!(carrier.capacity_bits(cover.as_slice()), 300);
    assert_eq!(carrier.capacity(cover.as_slice()), 36);
    assert_eq!(Carrier::binary(depth).capacity(cover.as_slice()), 33);

    let payload = vec![b'a'; 36];
    carrier.conceal(&payload, cover.as_mut_slice())?;
    assert_eq!(Package::text(depth).reveal(cover.as_slice())?, payload);

    assert!(matches!(
        carrier.conceal(&[b'a'; 37], cover.as_mut_slice()),
        Err(Error::PayloadTooLarge {
            needed: 304,
            capacity: 300
        })
    ));

    Ok(())
}

#[test]
fn it_fills_every_slot_of_a_small_image() -> Result<()> {
    let mut pixels = vec![0u8; 8 * 8 * 3];
    let depth = BitDepth::ONE;
    let carrier = Carrier::text(depth);

    let mut cover = ImageSlots::new(pixels.as_mut_slice(), 8, 8, PixelLayout::Rgb)?;
    assert_eq!(carrier.capacity(&cover), 23);

    let payload = [b'z'; 23];
    assert_eq!(carrier.conceal(&payload, &mut cover)?, 192);
    assert!(matches!(
        carrier.conceal(&[b'z'; 24], &mut cover),
        Err(Error::PayloadTooLarge {
            needed: 200,
            capacity: 192
        })
    ));

    let cover = ImageSlots::new(pixels.as_slice(), 8, 8, PixelLayout::Rgb)?;
    let extraction = Package::text(depth).extract(&cover)?;
    assert_eq!(extraction.payload, payload);
    assert!(extraction.complete);
    assert_eq!(extraction.slots_read, 192);

    Ok(())
}

#[test]
fn it_places_consecutive_bit_groups_in_consecutive_slots() -> Result<()> {
    let depth = BitDepth::new(3)?;
    let mut cover = vec![0u8; 64];

    Carrier::text(depth).conceal(b"Hi", cover.as_mut_slice())?;

    let stream = u32::from_be_bytes([0, b'H', b'i', 0]);
    for (slot, &value) in cover.iter().take(8).enumerate() {
        let expected = (stream >> (24 - 3 * (slot + 1))) & 0b111;
        assert_eq!(u32::from(value), expected, "slot {slot}");
    }

    Ok(())
}

#[test]
fn it_leaves_high_bits_untouched() -> Result<()> {
    let original = noisy(512);
    let mut cover = original.clone();
    let depth = BitDepth::new(5)?;

    let written = Carrier::text(depth).conceal(b"preserve me", cover.as_mut_slice())?;

    for (index, (&before, &after)) in original.iter().zip(&cover).enumerate() {
        assert_eq!(before >> 5, after >> 5, "slot {index}");
        if index >= written {
            assert_eq!(before, after, "slot {index}");
        }
    }

    Ok(())
}

#[test]
fn it_reveals_the_same_payload_every_time() -> Result<()> {
    let mut cover = noisy(1024);
    let depth = BitDepth::new(2)?;
    Carrier::text(depth).conceal(b"again and again", cover.as_mut_slice())?;

    let mut package = Package::text(depth);
    let first = package.extract(cover.as_slice())?;
    let second = package.extract(cover.as_slice())?;

    assert_eq!(first, second);
    assert_eq!(package.reveal(cover.as_slice())?, b"again and again");

    Ok(())
}

#[test]
fn it_refuses_text_containing_the_terminator() -> Result<()> {
    let mut cover = vec![0u8; 256];
    let result = Carrier::text(BitDepth::ONE).conceal(b"ab\0cd", cover.as_mut_slice());

    assert!(matches!(result, Err(Error::SentinelInPayload { offset: 2 })));
    assert!(cover.iter().all(|&slot| slot == 0));

    // a foreign encoder may have hidden it anyway, at depth 8
    let cover = *b"ab\0cd\0";
    assert_eq!(
        Package::text(BitDepth::new(8)?).reveal(cover.as_slice())?,
        b"ab"
    );

    Ok(())
}

#[test]
fn it_keeps_partial_data_without_a_terminator() -> Result<()> {
    let cover = vec![1u8; 30];
    let depth = BitDepth::ONE;

    let extraction = Package::text(depth).extract(cover.as_slice())?;
    assert_eq!(extraction.payload, [0xFF; 3]);
    assert!(!extraction.complete);
    assert_eq!(extraction.slots_read, 30);

    match Package::text(depth).reveal(cover.as_slice()) {
        Err(Error::DelimiterNotFound { partial }) => assert_eq!(partial, [0xFF; 3]),
        other => panic!("expected a missing delimiter, got {other:?}"),
    }

    Ok(())
}

#[test]
fn it_reports_a_truncated_binary_payload() -> Result<()> {
    let cover = bit_slots(&[0, 0, 0x03, 0xE8, b'x']);

    let result = Package::binary(BitDepth::ONE).reveal(cover.as_slice());

    assert!(matches!(
        result,
        Err(Error::TruncatedPayload {
            expected: 1000,
            actual: 1
        })
    ));

    Ok(())
}

#[test]
fn it_hides_binary_data_in_sixteen_bit_audio() -> Result<()> {
    let mut samples: Vec<i16> = (0..2048).map(|i| (i * 37 - 20_000) as i16).collect();
    let payload: Vec<u8> = (0..=255).collect();
    let depth = BitDepth::new(12)?;

    Carrier::binary(depth).conceal(&payload, samples.as_mut_slice())?;

    assert_eq!(Package::binary(depth).reveal(samples.as_slice())?, payload);

    Ok(())
}

#[test]
fn it_rejects_depths_wider_than_the_slots() -> Result<()> {
    let mut cover = vec![0u8; 64];
    let depth = BitDepth::new(9)?;

    assert!(matches!(
        Carrier::text(depth).conceal(b"x", cover.as_mut_slice()),
        Err(Error::InvalidBitDepth { depth: 9, max: 8 })
    ));
    assert!(matches!(
        Package::text(depth).reveal(cover.as_slice()),
        Err(Error::InvalidBitDepth { depth: 9, max: 8 })
    ));

    Ok(())
}

#[test]
fn it_ranks_the_true_depth_first() -> Result<()> {
    let mut pixels = noisy(32 * 32 * 3);

    let mut cover = ImageSlots::new(pixels.as_mut_slice(), 32, 32, PixelLayout::Rgb)?;
    Carrier::text(BitDepth::new(3)?).conceal(b"SECRET42", &mut cover)?;

    let cover = ImageSlots::new(pixels.as_slice(), 32, 32, PixelLayout::Rgb)?;
    let ranking = lsbs::rank(&cover, Framing::text())?;

    assert_eq!(ranking.len(), 8);
    assert_eq!(ranking[0].depth.get(), 3);
    assert_eq!(ranking[0].payload, b"SECRET42");
    assert_eq!(ranking[0].score, 1.0);
    assert!(ranking.windows(2).all(|pair| pair[0].score >= pair[1].score));

    Ok(())
}

#[test]
fn it_uses_only_the_configured_video_channel() -> Result<()> {
    let geometry = FrameGeometry {
        width: 4,
        height: 4,
        frames: 2,
    };
    let original: Vec<u8> = (0..96).collect();
    let mut frames = original.clone();
    let depth = BitDepth::new(2)?;

    let mut cover = VideoSlots::new(
        frames.as_mut_slice(),
        geometry,
        PixelLayout::Bgr,
        Channel::Green,
    )?;
    assert_eq!(cover.len(), 32);
    Carrier::text(depth).conceal(b"ok", &mut cover)?;

    for (index, (&before, &after)) in original.iter().zip(&frames).enumerate() {
        if index % 3 != 1 {
            assert_eq!(before, after, "byte {index} is not green");
        }
    }

    let green = VideoSlots::new(frames.as_slice(), geometry, PixelLayout::Bgr, Channel::Green)?;
    assert_eq!(Package::text(depth).reveal(&green)?, b"ok");

    let blue = VideoSlots::new(frames.as_slice(), geometry, PixelLayout::Bgr, Channel::Blue)?;
    assert!(matches!(
        Package::text(depth).reveal(&blue),
        Err(Error::DelimiterNotFound { .. })
    ));

    Ok(())
}

#[test]
fn it_stops_when_cancelled() -> Result<()> {
    let cover = vec![0xFFu8; 10_000];
    let mut polls = 0;

    let result = Package::text(BitDepth::ONE)
        .with_cancel(|| {
            polls += 1;
            polls > 1
        })
        .extract(cover.as_slice());

    assert!(matches!(result, Err(Error::Cancelled)));
    assert_eq!(polls, 2);

    Ok(())
}

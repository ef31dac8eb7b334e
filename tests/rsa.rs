use opencrypto::CryptoError;
use opencrypto::hash::DigestAlgorithm;
use opencrypto::rng::Csprng;
use opencrypto::rsa::{self, RsaKey, RsaLimits, pkcs1};

const N: &str = "ccdc55fa16b51c1c358d1bbdd0799384c8095791b9ebb4d8f3496ea5e3ef700c08cbdd4631dd9bc7c8c4ca42a95d4c080bc994868424771de54ad4e490c41918722530aec45e99b40916c77a6ff827c92cca8b35de70cb99e2a43d58178103873bb1e289b6e4365603f52c1ab49bdb2d4f9dc68617883dc34748bdbd9db7ec9b";
const D: &str = "199109fddb25a12b78177335de35be0e5d34a5441f92e6100954c9c5544c068cc9f03f5e4a4ce0eb2f083841d787383cecd3ac80992f3fda704a45857cf7ac35e24e4a53fa7695ec2adfb196fdf401fb3ea7354180e03fa2b72dcb518ef104d160f20f04605c00ad40d47da3e68e0faf70f533c51e2f4fde7e8d039ab0711961";
const E: &[u8] = &[0x01, 0x00, 0x01];

const FOX: &[u8] = b"The quick brown fox jumps over the lazy dog";

fn private_key() -> RsaKey {
    RsaKey::from_components(
        &hex::decode(N).unwrap(),
        E,
        Some(&hex::decode(D).unwrap()),
    )
    .unwrap()
}

fn public_key() -> RsaKey {
    RsaKey::from_components(&hex::decode(N).unwrap(), E, None).unwrap()
}

// -------------------------------------------------------
// 1. KEY ASSEMBLY
// -------------------------------------------------------

#[test]
fn assembles_private_and_public_keys() {
    let key = private_key();
    assert!(key.has_private());
    assert_eq!(key.modulus_bits(), 1024);
    assert_eq!(key.size(), 128);
    assert_eq!(key.modulus(), hex::decode(N).unwrap());
    assert_eq!(key.public_exponent(), E);

    let public = key.to_public();
    assert!(!public.has_private());
    assert_eq!(public.modulus(), key.modulus());
}

#[test]
fn leading_zero_bytes_are_ignored() {
    let mut n = vec![0, 0, 0];
    n.extend(hex::decode(N).unwrap());
    let key = RsaKey::from_components(&n, &[0, 0, 1, 0, 1], None).unwrap();

    assert_eq!(key.modulus_bits(), 1024);
    assert_eq!(key.size(), 128);
}

#[test]
fn rejects_invalid_exponents() {
    let n = hex::decode(N).unwrap();

    for e in [&[0x01, 0x00, 0x00][..], &[1], &[0], &[]] {
        assert_eq!(
            RsaKey::from_components(&n, e, None).err(),
            Some(CryptoError::InvalidExponent),
            "e = {e:?}"
        );
    }

    // e >= n
    assert_eq!(
        RsaKey::from_components(&n, &n, None).err(),
        Some(CryptoError::InvalidExponent)
    );

    // d = 0 and d = n
    assert_eq!(
        RsaKey::from_components(&n, E, Some(&[0])).err(),
        Some(CryptoError::InvalidExponent)
    );
    assert_eq!(
        RsaKey::from_components(&n, E, Some(&n)).err(),
        Some(CryptoError::InvalidExponent)
    );
}

#[test]
fn rejects_invalid_moduli() {
    let mut even = hex::decode(N).unwrap();
    *even.last_mut().unwrap() &= 0xfe;

    assert_eq!(
        RsaKey::from_components(&even, &[3], None).err(),
        Some(CryptoError::InvalidModulus)
    );
    assert_eq!(
        RsaKey::from_components(&[1], &[3], None).err(),
        Some(CryptoError::InvalidModulus)
    );
    assert_eq!(
        RsaKey::from_components(&[], &[3], None).err(),
        Some(CryptoError::InvalidModulus)
    );
}

#[test]
fn rejects_oversized_components() {
    let huge = vec![0xffu8; 1025];
    assert_eq!(
        RsaKey::from_components(&huge, E, None).err(),
        Some(CryptoError::KeyTooLarge {
            bits: 8200,
            max_bits: 8192
        })
    );

    let limits = RsaLimits {
        max_bits: 512,
        min_generated_bits: 512,
    };
    assert_eq!(
        RsaKey::from_components_with(limits, &hex::decode(N).unwrap(), E, None).err(),
        Some(CryptoError::KeyTooLarge {
            bits: 1024,
            max_bits: 512
        })
    );
}

#[test]
fn rejects_inconsistent_limits() {
    let limits = RsaLimits {
        max_bits: 1024,
        min_generated_bits: 2048,
    };
    assert!(matches!(
        RsaKey::from_components_with(limits, &hex::decode(N).unwrap(), E, None),
        Err(CryptoError::UnsupportedConfiguration(_))
    ));
}

// -------------------------------------------------------
// 2. RAW TRANSFORM
// -------------------------------------------------------

#[test]
fn raw_transform_uses_private_exponent_when_present() {
    let input = hex::decode("1234567890abcdef").unwrap();

    assert_eq!(
        hex::encode(private_key().raw_transform(&input).unwrap()),
        "bbe1ca8a96c971a20c385d06ca51e3ec3fdde1eea49576af960982178d28b6d886a7cc739666d41963830e5f109c9a80b2bb74b18636c76c5f8726ce5935f972b526b02d4c515d38be094f2824186ad0d01c2b34e655855f340ebf2e10a45ed44d0020d5879e00ad07a53130afbca04c6d76f77a22aa137e7b99bec6fb1e16d8"
    );
    assert_eq!(
        hex::encode(public_key().raw_transform(&input).unwrap()),
        "3d262467a3592e3e5f898fb7a700af75079294341942af4711a706c7f939ff348ab6198b2fa4002e084ed1f02937194b1165b8bbcdc6a2a3ab95086bcf855dbb54fddd3e32f154ff5cae2acddd2559054124b7aa05e1bf166bac482b56d0cd5d6236506226a7924ecd3f536847748eba908d8b329145fe239d847bdf98d13b8b"
    );
}

#[test]
fn transforms_are_inverse_and_padded() {
    let key = private_key();
    let input = [0x02u8];

    let c = key.public_transform(&input).unwrap();
    assert_eq!(c.len(), 128);

    let m = key.private_transform(&c).unwrap();
    assert_eq!(m.len(), 128);
    assert!(m[..127].iter().all(|&b| b == 0));
    assert_eq!(m[127], 0x02);
}

#[test]
fn zero_and_one_are_fixed_points() {
    let key = private_key();

    let zero = key.raw_transform(&[]).unwrap();
    assert_eq!(zero, vec![0u8; 128]);

    let one = key.raw_transform(&[1]).unwrap();
    assert_eq!(one[127], 1);
    assert!(one[..127].iter().all(|&b| b == 0));
}

#[test]
fn input_must_be_below_modulus() {
    let key = public_key();
    let n = hex::decode(N).unwrap();

    assert_eq!(key.raw_transform(&n), Err(CryptoError::InputOutOfRange));
    assert_eq!(
        key.raw_transform(&[0xff; 128]),
        Err(CryptoError::InputOutOfRange)
    );
    assert_eq!(
        key.private_transform(&[1]),
        Err(CryptoError::MissingPrivateExponent)
    );
}

// -------------------------------------------------------
// 3. PKCS#1 v1.5 SIGNATURES
// -------------------------------------------------------

const SIG_SHA256: &str = "07fd972a8cd17aaa09f4967388d52f815cbf29f445e79e2581fe6ffa52912ae4ade61fc51fe7fcdefebcb8f60d484e3f75d5ce0ddb2cce175f2c892e98b3984cf129bdfc9b11172d7841508c89bd9bbe3cd903a2210c9165015a2e370935ab7b380465997e5108fc6f221cb06d22184a7bbd08bbbea311fbbc565b56079fa10d";
const SIG_SHA512: &str = "c4719f22d6fadf6c281f81834a2cb13bb133941491c53806434f9edb6398a4042fe5e2e578b785022aba09d0899cab4bca6e3830bd515786cab3a41a036e0cb5f5c6bccf5007102606d5e82dbb5bce103b84a269bd6748ac4e69ab78d2cd88ab0821f58cd136b2de330fa3b955130a8c4c9a9bbbec0092d994755e51030a7f1c";

#[test]
fn signatures_match_known_values() {
    let key = private_key();

    let sig = pkcs1::sign(&key, DigestAlgorithm::Sha256, FOX).unwrap();
    assert_eq!(hex::encode(&sig), SIG_SHA256);

    let sig = pkcs1::sign(&key, DigestAlgorithm::Sha512, FOX).unwrap();
    assert_eq!(hex::encode(&sig), SIG_SHA512);
}

#[cfg(feature = "legacy")]
#[test]
fn legacy_signatures_match_known_values() {
    let key = private_key();

    let sig = pkcs1::sign(&key, DigestAlgorithm::Sha1, FOX).unwrap();
    assert_eq!(
        hex::encode(&sig),
        "8b5944cb4d693bb84d237371e8199938d93a0821db9677bd2d512edf4f9c0124c43990e27e040b217bd6a76bf01a2ffddeeec319caab65863a0913bfb31467b6a9ae1b864ba2cfa073fb93ea85e0cfd3fa3b9f5ec1bef3cdac38bdece6e47b495c02a88e1de8358bf4b6d817516a14fd5c6a4258a6858ce443db556f1fb0265f"
    );

    let sig = pkcs1::sign(&key, DigestAlgorithm::Md5, FOX).unwrap();
    assert_eq!(
        hex::encode(&sig),
        "4c7cb96b92e0235874c11aadbe7eb42130ef9e647f2628df920744b1aafabc8e58bf90fdb9402c5174ba89d1579eab87a08f6baa2e9189b138da4d053dd15d39dc21e7ee8250ff47259bec5ac3938f0e259a88998b8cf117e8db8e83509d77f7d018c0cd4464b48e979047f00c580dc731b74449d003e587d50dab83fa0f5e97"
    );
}

#[test]
fn public_key_verifies_known_signature() {
    let sig = hex::decode(SIG_SHA256).unwrap();
    assert!(pkcs1::verify(&public_key(), DigestAlgorithm::Sha256, FOX, &sig).is_ok());
}

#[test]
fn digest_variants_agree_with_message_variants() {
    let key = private_key();
    let digest = opencrypto::hash::sha256(FOX);

    let sig = pkcs1::sign_digest(&key, DigestAlgorithm::Sha256, &digest).unwrap();
    assert_eq!(hex::encode(&sig), SIG_SHA256);
    assert!(pkcs1::verify_digest(&key, DigestAlgorithm::Sha256, &digest, &sig).is_ok());

    assert_eq!(
        pkcs1::sign_digest(&key, DigestAlgorithm::Sha256, &digest[..20]),
        Err(CryptoError::InputOutOfRange)
    );
}

#[test]
fn tampering_is_detected() {
    let key = public_key();
    let sig = hex::decode(SIG_SHA256).unwrap();

    assert_eq!(
        pkcs1::verify(&key, DigestAlgorithm::Sha256, b"another message", &sig),
        Err(CryptoError::InvalidSignature)
    );
    assert_eq!(
        pkcs1::verify(&key, DigestAlgorithm::Sha512, FOX, &sig),
        Err(CryptoError::InvalidSignature)
    );

    let mut forged = sig.clone();
    forged[64] ^= 0x10;
    assert_eq!(
        pkcs1::verify(&key, DigestAlgorithm::Sha256, FOX, &forged),
        Err(CryptoError::InvalidSignature)
    );

    assert_eq!(
        pkcs1::verify(&key, DigestAlgorithm::Sha256, FOX, &sig[1..]),
        Err(CryptoError::InvalidSignature)
    );
    assert_eq!(
        pkcs1::verify(&key, DigestAlgorithm::Sha256, FOX, &[0xff; 128]),
        Err(CryptoError::InvalidSignature)
    );
}

#[test]
fn public_key_cannot_sign() {
    assert_eq!(
        pkcs1::sign(&public_key(), DigestAlgorithm::Sha256, FOX),
        Err(CryptoError::MissingPrivateExponent)
    );
}

// -------------------------------------------------------
// 4. PKCS#1 v1.5 ENCRYPTION
// -------------------------------------------------------

const CT_FOX: &str = "0089abff2b618bc86b2de620ed41dea32bafc24c358e40df5739ee825c5a366fb70196a7bb6db01d9e0dfbefce2a07c3e494bfcd7dec5726b1ce1b96a59861a7e8cfa90b6d0d54e34a4746c1eb1a0f7726b3fa736f5c87e9e03e93d1ebcafb44c4fe56f9a9d4818549ace070eec8c177934266a063ccfc6ad0ab241dd6ccbc71";

#[test]
fn decrypts_known_ciphertext() {
    let ct = hex::decode(CT_FOX).unwrap();
    assert_eq!(pkcs1::decrypt(&private_key(), &ct).unwrap(), FOX);
}

#[test]
fn encryption_round_trips() {
    let public = public_key();
    let private = private_key();

    let a = pkcs1::encrypt(&public, FOX).unwrap();
    let b = pkcs1::encrypt(&public, FOX).unwrap();

    assert_eq!(a.len(), 128);
    assert_ne!(a, b, "padding must be randomized");
    assert_eq!(pkcs1::decrypt(&private, &a).unwrap(), FOX);
    assert_eq!(pkcs1::decrypt(&private, &b).unwrap(), FOX);
}

#[test]
fn encryption_with_seeded_generator_is_reproducible() {
    let key = public_key();

    let a = pkcs1::encrypt_with(&key, FOX, &mut Csprng::from_seed([0x33; 32])).unwrap();
    let b = pkcs1::encrypt_with(&key, FOX, &mut Csprng::from_seed([0x33; 32])).unwrap();
    assert_eq!(a, b);

    // 00 02 || 82 nonzero padding bytes || 00 || message
    let em = private_key().private_transform(&a).unwrap();
    let separator = 128 - FOX.len() - 1;
    assert_eq!(&em[..2], &[0x00, 0x02]);
    assert!(em[2..separator].iter().all(|&byte| byte != 0));
    assert_eq!(em[separator], 0x00);
    assert_eq!(&em[separator + 1..], FOX);
}

#[test]
fn message_length_limits() {
    let public = public_key();
    let private = private_key();

    let longest = vec![0x61u8; 128 - 11];
    let ct = pkcs1::encrypt(&public, &longest).unwrap();
    assert_eq!(pkcs1::decrypt(&private, &ct).unwrap(), longest);

    let ct = pkcs1::encrypt(&public, &[]).unwrap();
    assert_eq!(pkcs1::decrypt(&private, &ct).unwrap(), Vec::<u8>::new());

    assert_eq!(
        pkcs1::encrypt(&public, &[0x61; 128 - 10]),
        Err(CryptoError::MessageTooLong)
    );
}

#[test]
fn tampered_ciphertext_fails_with_one_error() {
    let key = private_key();
    let ct = hex::decode(CT_FOX).unwrap();

    for index in [0, 64, 127] {
        let mut tampered = ct.clone();
        tampered[index] ^= 0x10;
        assert_eq!(
            pkcs1::decrypt(&key, &tampered),
            Err(CryptoError::DecryptionFailed),
            "byte {index}"
        );
    }

    assert_eq!(
        pkcs1::decrypt(&key, &ct[1..]),
        Err(CryptoError::DecryptionFailed)
    );
    assert_eq!(
        pkcs1::decrypt(&key, &[0xff; 128]),
        Err(CryptoError::DecryptionFailed)
    );
}

#[test]
fn malformed_blocks_are_rejected() {
    let key = private_key();

    // signature block type
    let mut em = vec![0x00, 0x01];
    em.extend_from_slice(&[0xff; 80]);
    em.push(0x00);
    em.resize(128, 0x61);
    let ct = key.public_transform(&em).unwrap();
    assert_eq!(pkcs1::decrypt(&key, &ct), Err(CryptoError::DecryptionFailed));

    // only seven bytes of padding
    let mut em = vec![0x00, 0x02, 1, 2, 3, 4, 5, 6, 7, 0x00];
    em.resize(128, 0x61);
    let ct = key.public_transform(&em).unwrap();
    assert_eq!(pkcs1::decrypt(&key, &ct), Err(CryptoError::DecryptionFailed));

    // no separator
    let mut em = vec![0x00, 0x02];
    em.resize(128, 0x61);
    let ct = key.public_transform(&em).unwrap();
    assert_eq!(pkcs1::decrypt(&key, &ct), Err(CryptoError::DecryptionFailed));
}

#[test]
fn public_key_cannot_decrypt() {
    let ct = hex::decode(CT_FOX).unwrap();
    assert_eq!(
        pkcs1::decrypt(&public_key(), &ct),
        Err(CryptoError::MissingPrivateExponent)
    );
}

// -------------------------------------------------------
// 5. KEY GENERATION
// -------------------------------------------------------

#[test]
fn generated_key_round_trips() {
    let mut rng = Csprng::from_seed([0x11; 32]);
    let key = rsa::generate(512, 65537, &mut rng).unwrap();

    assert_eq!(key.modulus_bits(), 512);
    assert_eq!(key.public_exponent(), E);
    assert!(key.has_private());

    let msg = [0x42u8; 32];
    let c = key.public_transform(&msg).unwrap();
    let m = key.private_transform(&c).unwrap();
    assert_eq!(&m[32..], &msg);

    let sig = pkcs1::sign(&key, DigestAlgorithm::Sha256, FOX).unwrap();
    assert!(pkcs1::verify(&key.to_public(), DigestAlgorithm::Sha256, FOX, &sig).is_ok());
}

#[test]
fn generation_is_deterministic_for_a_seed() {
    let a = rsa::generate(512, 3, &mut Csprng::from_seed([0x22; 32])).unwrap();
    let b = rsa::generate(512, 3, &mut Csprng::from_seed([0x22; 32])).unwrap();
    assert_eq!(a.modulus(), b.modulus());
}

#[test]
fn generation_rejects_bad_parameters() {
    let mut rng = Csprng::from_seed([0x33; 32]);

    for bits in [0, 256, 511, 513, 8194, 16384] {
        assert_eq!(
            rsa::generate(bits, 65537, &mut rng).err(),
            Some(CryptoError::InvalidKeySize(bits)),
            "{bits} bits"
        );
    }

    for e in [0, 1, 2, 65536] {
        assert_eq!(
            rsa::generate(512, e, &mut rng).err(),
            Some(CryptoError::InvalidExponent),
            "e = {e}"
        );
    }
}

#[test]
fn generation_honours_custom_limits() {
    let limits = RsaLimits {
        max_bits: 1024,
        min_generated_bits: 128,
    };
    let mut rng = Csprng::from_seed([0x44; 32]);

    let key = rsa::generate_with(limits, 128, 65537, &mut rng).unwrap();
    assert_eq!(key.modulus_bits(), 128);

    assert_eq!(
        rsa::generate_with(limits, 2048, 65537, &mut rng).err(),
        Some(CryptoError::InvalidKeySize(2048))
    );
}
